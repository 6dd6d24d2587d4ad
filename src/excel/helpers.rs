use chrono::{DateTime, Local};

use crate::{
    error::{SyncError, WorkbookError},
    excel::host::Workbook,
    models::{excel::CellRef, item::PriceRow, user_sheet::UserInfo},
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the request identity and contact from the Config sheet. Blank cells (or cells with
/// only whitespace) count as missing.
pub fn read_user_info(
    workbook: &dyn Workbook,
    config_sheet: &str,
    cell_identity: CellRef,
    cell_contact: CellRef,
) -> Result<UserInfo, SyncError> {
    let read = |cell: CellRef| -> Result<Option<String>, WorkbookError> {
        Ok(workbook.read_text(config_sheet, cell)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    };

    match (read(cell_identity)?, read(cell_contact)?) {
        (Some(identity), Some(contact)) => Ok(UserInfo { identity, contact }),
        (identity, contact) => Err(SyncError::MissingConfiguration { identity, contact }),
    }
}

/// Writes name | high | low | volume starting at `start`, one row per item. Whatever sits
/// below the last row from an earlier, longer write is left as it was.
pub fn write_price_rows(
    workbook: &mut dyn Workbook,
    sheet: &str,
    start: CellRef,
    rows: &[PriceRow],
) -> Result<(), WorkbookError> {
    for (i, row) in rows.iter().enumerate() {
        let name_cell = start.down(i as u32);

        workbook.write_text(sheet, name_cell, &row.name)?;
        workbook.write_number(sheet, name_cell.right(1), row.high as f64)?;
        workbook.write_number(sheet, name_cell.right(2), row.low as f64)?;
        workbook.write_number(sheet, name_cell.right(3), row.volume as f64)?;
    }
    Ok(())
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn timestamp_now() -> String {
    format_timestamp(&Local::now())
}
