//! In-memory spreadsheet host for tests.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    error::WorkbookError,
    excel::host::{Application, SpreadsheetHost, Workbook},
    models::excel::CellRef,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Text(String),
    Number(f64),
}

#[derive(Default)]
struct ProbeState {
    launches: Cell<usize>,
    quits: Cell<usize>,
    saves: Cell<usize>,
    writes: RefCell<Vec<(String, CellRef, MockValue)>>,
}

/// Shared view of what happened to every workbook of a [`MockHost`].
#[derive(Clone, Default)]
pub struct Probe(Rc<ProbeState>);

impl Probe {
    pub fn launches(&self) -> usize { self.0.launches.get() }
    pub fn quits(&self) -> usize { self.0.quits.get() }
    pub fn saves(&self) -> usize { self.0.saves.get() }

    pub fn writes(&self) -> Vec<(String, CellRef, MockValue)> {
        self.0.writes.borrow().clone()
    }

    pub fn writes_to(&self, sheet: &str) -> Vec<(CellRef, MockValue)> {
        self.writes().into_iter()
            .filter(|(s, _, _)| s == sheet)
            .map(|(_, cell, value)| (cell, value))
            .collect()
    }
}

pub struct MockWorkbook {
    path: Option<PathBuf>,
    sheets: Vec<String>,
    cells: HashMap<(String, CellRef), MockValue>,
    fail_save: bool,
    probe: Probe,
}

impl MockWorkbook {
    /// Workbook saved at `path` with empty Config and Prices sheets.
    pub fn at(path: &str) -> Self {
        MockWorkbook {
            path: Some(PathBuf::from(path)),
            sheets: vec![String::from("Config"), String::from("Prices")],
            cells: HashMap::new(),
            fail_save: false,
            probe: Probe::default(),
        }
    }

    pub fn unsaved() -> Self {
        MockWorkbook { path: None, ..MockWorkbook::at("") }
    }

    pub fn with_text(mut self, sheet: &str, cell: &str, value: &str) -> Self {
        let cell: CellRef = cell.parse().expect("valid test cell");
        self.cells.insert((sheet.to_string(), cell), MockValue::Text(value.to_string()));
        self
    }

    /// Config sheet filled in with a usable identity and contact.
    pub fn configured(self) -> Self {
        self.with_text("Config", "B4", "herb_runner").with_text("Config", "B5", "herbs@example.com")
    }

    pub fn without_sheet(mut self, sheet: &str) -> Self {
        self.sheets.retain(|s| s != sheet);
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn value(&self, sheet: &str, cell: &str) -> Option<&MockValue> {
        let cell: CellRef = cell.parse().expect("valid test cell");
        self.cells.get(&(sheet.to_string(), cell))
    }

    fn check_sheet(&self, sheet: &str) -> Result<(), WorkbookError> {
        if self.has_sheet(sheet) { Ok(()) } else { Err(WorkbookError::SheetNotFound(sheet.to_string())) }
    }

    fn record(&mut self, sheet: &str, cell: CellRef, value: MockValue) -> Result<(), WorkbookError> {
        self.check_sheet(sheet)?;
        self.probe.0.writes.borrow_mut().push((sheet.to_string(), cell, value.clone()));
        self.cells.insert((sheet.to_string(), cell), value);
        Ok(())
    }
}

impl Workbook for MockWorkbook {
    fn full_name(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.iter().any(|s| s == sheet)
    }

    fn read_text(&self, sheet: &str, cell: CellRef) -> Result<Option<String>, WorkbookError> {
        self.check_sheet(sheet)?;
        Ok(self.cells.get(&(sheet.to_string(), cell)).map(|v| match v {
            MockValue::Text(t) => t.clone(),
            MockValue::Number(n) => n.to_string(),
        }))
    }

    fn write_text(&mut self, sheet: &str, cell: CellRef, value: &str) -> Result<(), WorkbookError> {
        self.record(sheet, cell, MockValue::Text(value.to_string()))
    }

    fn write_number(&mut self, sheet: &str, cell: CellRef, value: f64) -> Result<(), WorkbookError> {
        self.record(sheet, cell, MockValue::Number(value))
    }

    fn save(&mut self) -> Result<(), WorkbookError> {
        if self.fail_save {
            return Err(WorkbookError::Write {
                path: self.path.clone().unwrap_or_default(),
                message: String::from("disk full"),
            });
        }
        self.probe.0.saves.set(self.probe.0.saves.get() + 1);
        Ok(())
    }
}

struct MockApplication {
    workbook: MockWorkbook,
}

impl Application for MockApplication {
    fn workbook(&mut self) -> &mut dyn Workbook {
        &mut self.workbook
    }

    fn quit(self: Box<Self>) -> Result<(), WorkbookError> {
        let probe = &self.workbook.probe.0;
        probe.quits.set(probe.quits.get() + 1);
        Ok(())
    }
}

/// Host with a fixed set of open workbooks and at most one file it can launch.
#[derive(Default)]
pub struct MockHost {
    pub open: Vec<MockWorkbook>,
    launchable: Option<MockWorkbook>,
    probe: Probe,
}

impl MockHost {
    pub fn new() -> Self {
        MockHost::default()
    }

    pub fn with_open(mut self, mut workbook: MockWorkbook) -> Self {
        workbook.probe = self.probe.clone();
        self.open.push(workbook);
        self
    }

    pub fn with_launchable(mut self, mut workbook: MockWorkbook) -> Self {
        workbook.probe = self.probe.clone();
        self.launchable = Some(workbook);
        self
    }

    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }
}

impl SpreadsheetHost for MockHost {
    fn open_workbooks(&mut self) -> Vec<&mut dyn Workbook> {
        self.open.iter_mut().map(|wb| wb as &mut dyn Workbook).collect()
    }

    fn launch_hidden(&mut self, path: &Path) -> Result<Box<dyn Application>, WorkbookError> {
        let workbook = self.launchable.take()
            .ok_or_else(|| WorkbookError::NotFound(path.to_path_buf()))?;
        self.probe.0.launches.set(self.probe.0.launches.get() + 1);
        Ok(Box::new(MockApplication { workbook }))
    }
}

/// Writes `Herbology.xlsx` into `dir` with a Config sheet (B4/B5 set unless blank) and a
/// Prices sheet that already holds a leftover row at A5.
pub fn xlsx_fixture(dir: &Path, identity: &str, contact: &str) -> PathBuf {
    let path = dir.join("Herbology.xlsx");
    let mut book = umya_spreadsheet::new_file();

    let config = book.get_sheet_mut(&0).unwrap();
    config.set_name("Config");
    for (cell, value) in [((2, 4), identity), ((2, 5), contact)] {
        if !value.is_empty() {
            config.get_cell_value_mut(cell).set_value_string(value);
        }
    }

    let prices = book.new_sheet("Prices").unwrap();
    prices.get_cell_value_mut((1, 5)).set_value_string("Stale item");

    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

/// `YYYY-MM-DD HH:MM:SS`, digits everywhere except the separators.
pub fn assert_timestamp_shape(stamp: &str) {
    assert_eq!(stamp.len(), 19, "{stamp:?}");
    for (i, c) in stamp.chars().enumerate() {
        match i {
            4 | 7 => assert_eq!(c, '-', "{stamp:?}"),
            10 => assert_eq!(c, ' ', "{stamp:?}"),
            13 | 16 => assert_eq!(c, ':', "{stamp:?}"),
            _ => assert!(c.is_ascii_digit(), "{stamp:?}"),
        }
    }
}
