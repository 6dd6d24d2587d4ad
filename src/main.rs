mod browser;
mod error;
mod excel;
mod models;
mod parsing;
mod pricing;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use browser::wiki_prices::WikiPrices;
use error::SyncError;
use excel::{excel_ops::FileHost, excel_runtime::run_program};
use models::{user_sheet::LAYOUT, web::API_BASE_DEFAULT};

const DEFAULT_WORKBOOKS: [&str; 2] = ["Herbology.xlsm", "Herbology.xlsx"];

#[derive(Parser, Debug)]
#[command(name = "price_sync", version, about = "Refresh GE prices and volumes in the Herbology workbook")]
struct Cli {
    /// Workbook to update (default: Herbology.xlsm, then Herbology.xlsx, next to this program)
    workbook: Option<PathBuf>,

    /// Base url of the price api
    #[arg(long, env = "PRICE_SYNC_API_BASE", default_value = API_BASE_DEFAULT)]
    api_base: String,

    /// Give up on a request after this many seconds
    #[arg(long, env = "PRICE_SYNC_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log filter, e.g. "debug" or "price_sync=trace"
    #[arg(long, env = "RUST_LOG", default_value = "price_sync=info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<SyncError>() {
            Some(SyncError::MissingConfiguration { identity, contact }) => {
                println!("ERROR: Request identity and e-mail address must be provided in the Config sheet!");
                println!("  Identity ({}): {}", LAYOUT.cell_identity, identity.as_deref().unwrap_or("MISSING"));
                println!("  E-mail ({}): {}", LAYOUT.cell_contact, contact.as_deref().unwrap_or("MISSING"));
                ExitCode::from(1)
            }
            Some(sync) => {
                error!("{:#}", e);
                ExitCode::from(sync.exit_code())
            }
            None => {
                error!("{:#}", e);
                ExitCode::from(2)
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let target = match cli.workbook {
        Some(path) => expand_home(&path),
        None => {
            let exe = std::env::current_exe().context("Couldn't locate this program")?;
            default_workbook(exe.parent().unwrap_or_else(|| Path::new(".")))
        }
    };

    let source = WikiPrices::new(&cli.api_base, cli.timeout_secs.map(Duration::from_secs))?;
    let report = run_program(&mut FileHost, &source, &target, &LAYOUT).await?;

    println!("  High prices: {} items", report.high_prices);
    println!("  Low prices: {} items", report.low_prices);
    println!("  Volume data: {} items", report.volumes);
    println!("  Rows written: {}", report.rows_written);
    println!();
    println!("Updated {} items with both high/low prices", report.updated);
    println!("Last Updated: {}", report.timestamp);
    println!("Done!");
    Ok(())
}

/// The macro-enabled workbook wins when both exist.
fn default_workbook(dir: &Path) -> PathBuf {
    let preferred = dir.join(DEFAULT_WORKBOOKS[0]);
    if preferred.exists() { preferred } else { dir.join(DEFAULT_WORKBOOKS[1]) }
}

fn expand_home(path: &Path) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}
