use std::sync::LazyLock;

use crate::{error::WorkbookError, models::excel::CellRef};

/// Where everything lives inside the workbook.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub config_sheet: String,    // Sheet holding the request headers
    pub cell_identity: String,   // User-Agent value
    pub cell_contact: String,    // From value (e-mail)
    pub prices_sheet: String,    // Sheet the rows are written to
    pub cell_rows_start: String, // Top-left of name | high | low | volume
    pub cell_timestamp: String,  // Last updated
}

pub static LAYOUT: LazyLock<SheetLayout> = LazyLock::new(|| SheetLayout {
    config_sheet: String::from("Config"),
    cell_identity: String::from("B4"),
    cell_contact: String::from("B5"),
    prices_sheet: String::from("Prices"),
    cell_rows_start: String::from("A2"),
    cell_timestamp: String::from("G2"),
});

/// Layout with every cell address already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCells {
    pub identity: CellRef,
    pub contact: CellRef,
    pub rows_start: CellRef,
    pub timestamp: CellRef,
}

impl SheetLayout {
    pub fn resolve(&self) -> Result<ResolvedCells, WorkbookError> {
        if self.config_sheet.trim().is_empty() {
            return Err(WorkbookError::SheetNotFound(self.config_sheet.clone()));
        }
        if self.prices_sheet.trim().is_empty() {
            return Err(WorkbookError::SheetNotFound(self.prices_sheet.clone()));
        }

        Ok(ResolvedCells {
            identity: self.cell_identity.parse()?,
            contact: self.cell_contact.parse()?,
            rows_start: self.cell_rows_start.parse()?,
            timestamp: self.cell_timestamp.parse()?,
        })
    }
}

/// Who we tell the price api we are. Both values come from the Config sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub identity: String,
    pub contact: String,
}
