use std::path::Path;

use tracing::{debug, info};

use crate::{
    browser::wiki_prices::PriceSource,
    error::{SyncError, WorkbookError},
    excel::{
        helpers::{read_user_info, timestamp_now, write_price_rows},
        host::{open_workbook, SpreadsheetHost, Workbook},
    },
    models::user_sheet::{ResolvedCells, SheetLayout},
    parsing::item_wiki::{build_mapping, market_data},
    pricing::prices::{count_duplicate_names, count_updated, join_rows},
};

/// What a finished sync did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub rows_written: usize,
    pub high_prices: usize,
    pub low_prices: usize,
    pub volumes: usize,
    pub updated: usize,
    pub timestamp: String,
}

/// One full refresh of the Prices sheet.
///
/// The workbook is released on every path out of here. If this run opened it, it is closed
/// and its application terminated even when the config is blank or a fetch fails.
pub async fn run_program<S: PriceSource>(
    host: &mut dyn SpreadsheetHost,
    source: &S,
    target: &Path,
    layout: &SheetLayout,
) -> Result<SyncReport, SyncError> {
    let cells = layout.resolve()?;

    let mut lease = open_workbook(host, target)?;
    debug!(owned = lease.is_owned(), "Got workbook");
    let result = match lease.workbook() {
        Ok(workbook) => sync_workbook(workbook, source, layout, &cells).await,
        Err(e) => Err(e.into()),
    };
    let released = lease.release();

    let report = result?;
    released?;
    Ok(report)
}

async fn sync_workbook<S: PriceSource>(
    workbook: &mut dyn Workbook,
    source: &S,
    layout: &SheetLayout,
    cells: &ResolvedCells,
) -> Result<SyncReport, SyncError> {
    for sheet in [&layout.prices_sheet, &layout.config_sheet] {
        if !workbook.has_sheet(sheet) {
            return Err(WorkbookError::SheetNotFound(sheet.clone()).into());
        }
    }

    let user = read_user_info(workbook, &layout.config_sheet, cells.identity, cells.contact)?;
    println!("Using identity: {}", user.identity);
    println!("Using contact: {}", user.contact);

    println!("Fetching GE data...");
    println!("  Fetching item mapping...");
    let mapping = build_mapping(source.fetch_mapping(&user).await?);
    info!(items = mapping.len(), "Fetched item mapping");
    let latest = source.fetch_latest(&user).await?;
    let hourly = source.fetch_hourly(&user).await?;
    debug!(latest = latest.data.len(), hourly = hourly.data.len(), "Fetched prices and volumes");

    let market = market_data(&latest, &hourly, &mapping);

    let duplicates = count_duplicate_names(&mapping);
    if duplicates > 0 {
        debug!(duplicates, "Names shared by more than one item id, last value wins");
    }

    let rows = join_rows(&mapping, &market);
    if !rows.is_empty() {
        write_price_rows(workbook, &layout.prices_sheet, cells.rows_start, &rows)?;
    }

    let timestamp = timestamp_now();
    workbook.write_text(&layout.prices_sheet, cells.timestamp, &timestamp)?;
    workbook.save()?;
    info!(rows = rows.len(), %timestamp, "Saved workbook");

    Ok(SyncReport {
        rows_written: rows.len(),
        high_prices: market.prices.len(),
        low_prices: market.prices.len(),
        volumes: market.volumes.len(),
        updated: count_updated(&rows, &market),
        timestamp,
    })
}
