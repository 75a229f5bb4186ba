//! Reads the three catalog sheets out of an uploaded `.xlsx`/`.xlsm` payload.
//!
//! Every sheet is exposed as rows of [`CellValue`]s indexed by absolute column position, with
//! the header row (row 0) skipped. calamine trims leading empty rows and columns from a
//! range, so rows are re-anchored to column A here and callers can rely on fixed positions.

use crate::import::error::ImportError;
use crate::import::ImportConfig;
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::info;

/// A single cell narrowed to the three shapes the catalog sheets use.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
                if text.trim().is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(text.clone())
                }
            }
            Data::Int(value) => CellValue::Number(*value as f64),
            Data::Float(value) => CellValue::Number(*value),
            Data::Bool(value) => CellValue::Number(if *value { 1.0 } else { 0.0 }),
            Data::DateTime(value) => CellValue::Number(value.as_f64()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Trimmed text content. Whole numbers render without a fractional part so an
    /// acronym typed as `1` reads back as `"1"`, not `"1.0"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(value) if value.fract() == 0.0 => Some(format!("{}", *value as i64)),
            CellValue::Number(value) => Some(value.to_string()),
            CellValue::Empty => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        }
    }

    /// Integral value that fits an `i32`; anything else is treated as absent.
    pub fn as_id(&self) -> Option<i32> {
        let value = self.as_number()?;
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return None;
        }
        Some(value as i32)
    }
}

/// One data row. Columns past the end of the row read as [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: Vec<CellValue>,
}

impl SheetRow {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }
}

/// The parsed workbook: glossary and UFIDs fully materialized, objectives kept as a range
/// and decoded row by row.
pub struct CatalogWorkbook {
    pub glossary: HashMap<String, String>,
    pub ufids: Vec<(i32, String)>,
    objectives: Range<Data>,
}

impl CatalogWorkbook {
    pub fn objective_rows(&self) -> impl Iterator<Item = SheetRow> + '_ {
        data_rows(&self.objectives)
    }
}

const GLOSSARY_NAME_COLUMN: usize = 0;
const GLOSSARY_ACRONYM_COLUMN: usize = 1;
const UFID_ID_COLUMN: usize = 2;
const UFID_NAME_COLUMN: usize = 3;

pub fn read_workbook(bytes: &[u8], config: &ImportConfig) -> Result<CatalogWorkbook, ImportError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(|err| {
        ImportError::Format(format!("could not open spreadsheet ({} bytes): {err}", bytes.len()))
    })?;
    let acronyms = sheet_range(&mut workbook, &config.sheet_acronyms)?;
    let ufids = sheet_range(&mut workbook, &config.sheet_ufids)?;
    let objectives = sheet_range(&mut workbook, &config.sheet_objectives)?;

    let glossary = read_glossary(&acronyms);
    let ufids = read_ufids(&ufids);
    info!(
        "Read workbook with {} glossary entries and {} UFIDs",
        glossary.len(),
        ufids.len()
    );
    Ok(CatalogWorkbook {
        glossary,
        ufids,
        objectives,
    })
}

fn sheet_range(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    sheet_name: &str,
) -> Result<Range<Data>, ImportError> {
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(ImportError::Format(format!(
            "missing required sheet '{sheet_name}'"
        )));
    }
    workbook
        .worksheet_range(sheet_name)
        .map_err(|err| ImportError::Format(format!("could not read sheet '{sheet_name}': {err}")))
}

/// Rows below the header, re-anchored so index 0 is column A.
fn data_rows(range: &Range<Data>) -> impl Iterator<Item = SheetRow> + '_ {
    let (first_row, first_column) = range.start().unwrap_or((0, 0));
    range
        .rows()
        .enumerate()
        .filter(move |(offset, _)| first_row as usize + offset > 0)
        .map(move |(_, cells)| {
            let mut row = vec![CellValue::Empty; first_column as usize];
            row.extend(cells.iter().map(CellValue::from_data));
            SheetRow::new(row)
        })
}

/// Upper-cased acronym to display name. A later row with the same acronym overwrites an
/// earlier one; a row with no name maps the acronym to itself.
fn read_glossary(range: &Range<Data>) -> HashMap<String, String> {
    let mut glossary = HashMap::new();
    for row in data_rows(range) {
        let Some(acronym) = row.cell(GLOSSARY_ACRONYM_COLUMN).as_text() else {
            continue;
        };
        let acronym = acronym.to_uppercase();
        let name = row
            .cell(GLOSSARY_NAME_COLUMN)
            .as_text()
            .unwrap_or_else(|| acronym.clone());
        glossary.insert(acronym, name);
    }
    glossary
}

fn read_ufids(range: &Range<Data>) -> Vec<(i32, String)> {
    data_rows(range)
        .filter_map(|row| {
            let id = row.cell(UFID_ID_COLUMN).as_id()?;
            let name = row.cell(UFID_NAME_COLUMN).as_text().unwrap_or_default();
            Some((id, name))
        })
        .collect()
}
