use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use umya_spreadsheet::{reader, writer, Spreadsheet, Worksheet};

use crate::{
    error::WorkbookError,
    excel::host::{Application, SpreadsheetHost, Workbook},
    models::excel::CellRef,
};

/// A workbook file loaded into memory with umya-spreadsheet.
pub struct XlsxWorkbook {
    path: PathBuf,
    book: Spreadsheet,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> Result<Self, WorkbookError> {
        if !path.exists() {
            return Err(WorkbookError::NotFound(path.to_path_buf()));
        }

        let book = reader::xlsx::read(path).map_err(|e| WorkbookError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(XlsxWorkbook { path: path.to_path_buf(), book })
    }

    fn sheet(&self, name: &str) -> Result<&Worksheet, WorkbookError> {
        self.book.get_sheet_by_name(name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet, WorkbookError> {
        self.book.get_sheet_by_name_mut(name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }
}

impl Workbook for XlsxWorkbook {
    fn full_name(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }

    fn has_sheet(&self, sheet: &str) -> bool {
        self.book.get_sheet_by_name(sheet).is_some()
    }

    fn read_text(&self, sheet: &str, cell: CellRef) -> Result<Option<String>, WorkbookError> {
        let value = self.sheet(sheet)?
            .get_cell(cell.as_tuple())
            .map(|c| c.get_value().to_string())
            .filter(|v| !v.is_empty());
        Ok(value)
    }

    fn write_text(&mut self, sheet: &str, cell: CellRef, value: &str) -> Result<(), WorkbookError> {
        self.sheet_mut(sheet)?
            .get_cell_value_mut(cell.as_tuple())
            .set_value_string(value);
        Ok(())
    }

    fn write_number(&mut self, sheet: &str, cell: CellRef, value: f64) -> Result<(), WorkbookError> {
        self.sheet_mut(sheet)?
            .get_cell_value_mut(cell.as_tuple())
            .set_value_number(value);
        Ok(())
    }

    fn save(&mut self) -> Result<(), WorkbookError> {
        writer::xlsx::write(&self.book, &self.path).map_err(|e| WorkbookError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

/// In-process "instance" owning a single file-backed workbook.
pub struct XlsxSession {
    workbook: XlsxWorkbook,
}

impl Application for XlsxSession {
    fn workbook(&mut self) -> &mut dyn Workbook {
        &mut self.workbook
    }

    fn quit(self: Box<Self>) -> Result<(), WorkbookError> {
        debug!(path = %self.workbook.path.display(), "Closing workbook");
        Ok(())
    }
}

/// Works directly on workbook files. There is no running application to attach to, so
/// every run opens (and owns) its own copy of the file. Attaching to a live instance is
/// left to other [`SpreadsheetHost`] implementations.
#[derive(Debug, Default)]
pub struct FileHost;

impl SpreadsheetHost for FileHost {
    fn open_workbooks(&mut self) -> Vec<&mut dyn Workbook> {
        Vec::new()
    }

    fn launch_hidden(&mut self, path: &Path) -> Result<Box<dyn Application>, WorkbookError> {
        if let Some(lock) = owner_lock_file(path) {
            warn!(
                lock = %lock.display(),
                "Workbook looks open in another program, saving it there later will overwrite these prices"
            );
        }

        Ok(Box::new(XlsxSession { workbook: XlsxWorkbook::open(path)? }))
    }
}

/// Office drops `~$<name>` next to a workbook while it is open. For long names the first
/// two characters of the file name get replaced instead.
pub fn owner_lock_file(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut candidates = vec![format!("~${}", name)];
    if let Some(tail) = name.get(2..) {
        candidates.push(format!("~${}", tail));
    }

    candidates.into_iter()
        .map(|c| dir.join(c))
        .find(|p| p.exists())
}
