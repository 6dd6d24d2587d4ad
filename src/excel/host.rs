//! Seam between the sync and whatever spreadsheet application holds the workbook.
//!
//! A [`SpreadsheetHost`] knows which workbooks are already open and can launch a fresh,
//! hidden application instance for a file. [`open_workbook`] picks between the two and
//! hands back a [`WorkbookLease`] that remembers who is responsible for tearing it down.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{error::WorkbookError, models::excel::CellRef};

/// A workbook inside some spreadsheet application.
pub trait Workbook {
    /// Full path of the file backing the workbook, if it has been saved anywhere.
    fn full_name(&self) -> Option<PathBuf>;

    fn has_sheet(&self, sheet: &str) -> bool;

    /// Text of a cell. `None` when the cell doesn't exist or has no value.
    fn read_text(&self, sheet: &str, cell: CellRef) -> Result<Option<String>, WorkbookError>;

    fn write_text(&mut self, sheet: &str, cell: CellRef, value: &str) -> Result<(), WorkbookError>;

    fn write_number(&mut self, sheet: &str, cell: CellRef, value: f64) -> Result<(), WorkbookError>;

    fn save(&mut self) -> Result<(), WorkbookError>;
}

/// An application instance this run launched, holding exactly one workbook.
pub trait Application {
    fn workbook(&mut self) -> &mut dyn Workbook;

    /// Close the workbook without saving and terminate the instance.
    fn quit(self: Box<Self>) -> Result<(), WorkbookError>;
}

pub trait SpreadsheetHost {
    /// Every workbook open in every running instance.
    fn open_workbooks(&mut self) -> Vec<&mut dyn Workbook>;

    /// Start a new hidden instance and open `path` in it.
    fn launch_hidden(&mut self, path: &Path) -> Result<Box<dyn Application>, WorkbookError>;
}

/// Index of the open workbook backed by `target`, comparing paths case-insensitively.
pub fn find_open_workbook(target: &Path, open: &[Option<PathBuf>]) -> Option<usize> {
    let wanted = path_key(target);
    open.iter().position(|name| name.as_deref().is_some_and(|p| path_key(p) == wanted))
}

fn path_key(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute.to_string_lossy().to_lowercase()
}

/// Attach to the workbook if something already has it open, otherwise open it ourselves.
pub fn open_workbook<'h>(host: &'h mut dyn SpreadsheetHost, target: &Path) -> Result<WorkbookLease<'h>, WorkbookError> {
    let names: Vec<Option<PathBuf>> = host.open_workbooks().iter().map(|wb| wb.full_name()).collect();

    if let Some(index) = find_open_workbook(target, &names) {
        info!(path = %target.display(), "Attached to workbook that was already open");
        let workbook = host.open_workbooks()
            .into_iter()
            .nth(index)
            .ok_or_else(|| WorkbookError::Host(String::from("Open workbook vanished while attaching")))?;
        return Ok(WorkbookLease::Borrowed(workbook));
    }

    info!(path = %target.display(), "Opening workbook in a new hidden instance");
    let app = host.launch_hidden(target)?;
    Ok(WorkbookLease::Owned(OwnedApplication { app: Some(app) }))
}

/// A workbook for the duration of one run.
///
/// Borrowed workbooks belong to somebody else and are left alone. Owned ones are closed and
/// their instance terminated on [`WorkbookLease::release`], or on drop if the run never got
/// that far.
pub enum WorkbookLease<'h> {
    Borrowed(&'h mut dyn Workbook),
    Owned(OwnedApplication),
}

impl WorkbookLease<'_> {
    pub fn is_owned(&self) -> bool {
        matches!(self, WorkbookLease::Owned(_))
    }

    pub fn workbook(&mut self) -> Result<&mut dyn Workbook, WorkbookError> {
        match self {
            WorkbookLease::Borrowed(wb) => Ok(&mut **wb),
            WorkbookLease::Owned(owned) => owned.app.as_mut()
                .map(|app| app.workbook())
                .ok_or_else(|| WorkbookError::Host(String::from("Application was already shut down"))),
        }
    }

    pub fn release(self) -> Result<(), WorkbookError> {
        match self {
            WorkbookLease::Borrowed(_) => {
                debug!("Leaving borrowed workbook open");
                Ok(())
            }
            WorkbookLease::Owned(mut owned) => owned.shutdown(),
        }
    }
}

pub struct OwnedApplication {
    app: Option<Box<dyn Application>>,
}

impl OwnedApplication {
    fn shutdown(&mut self) -> Result<(), WorkbookError> {
        match self.app.take() {
            Some(app) => {
                debug!("Closing workbook and quitting the instance we launched");
                app.quit()
            }
            None => Ok(()),
        }
    }
}

impl Drop for OwnedApplication {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Failed to shut down spreadsheet application: {}", e);
        }
    }
}
