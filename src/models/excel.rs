use std::{fmt, str::FromStr};

use crate::error::WorkbookError;

/// A single cell address, 1-based like the spreadsheet itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub col: u32,
    pub row: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> Self {
        CellRef { col, row }
    }

    /// Same row, `n` columns to the right.
    pub fn right(self, n: u32) -> Self {
        CellRef { col: self.col + n, row: self.row }
    }

    /// Same column, `n` rows down.
    pub fn down(self, n: u32) -> Self {
        CellRef { col: self.col, row: self.row + n }
    }

    /// Coordinates in the (col, row) order umya-spreadsheet takes.
    pub fn as_tuple(self) -> (u32, u32) {
        (self.col, self.row)
    }
}

impl FromStr for CellRef {
    type Err = WorkbookError;

    // Accepts "B4", "$B4", "B$4" and "$B$4".
    fn from_str(s: &str) -> Result<Self, WorkbookError> {
        let invalid = || WorkbookError::InvalidCell(s.to_string());
        let trimmed = s.trim();

        let (letters, rest) = {
            let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
            let split = body.find(|c: char| !c.is_ascii_alphabetic()).ok_or_else(invalid)?;
            body.split_at(split)
        };
        let digits = rest.strip_prefix('$').unwrap_or(rest);

        if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let col = letters
            .chars()
            .try_fold(0u32, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
            })
            .ok_or_else(invalid)?;
        let row = digits.parse::<u32>().map_err(|_| invalid())?;

        if row == 0 { return Err(invalid()) }
        Ok(CellRef::new(col, row))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters: Vec<char> = Vec::new();
        let mut n = self.col;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let col: String = letters.iter().rev().collect();
        write!(f, "{}{}", col, self.row)
    }
}
