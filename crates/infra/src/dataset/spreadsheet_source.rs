//! Spreadsheet attribute dataset (xlsx, xls, xlsb, ods)
//!
//! The first worksheet is read. Its first row holds the column headers and
//! every following row is one dataset row, in sheet order.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use attrsync_core::DatasetSource;
use attrsync_domain::{AttrSyncError, CellValue, Dataset, Result};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use tracing::info;

use super::read_optional;

// Integral floats below this magnitude are read back as integers.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Loads a [`Dataset`] from the first worksheet of a workbook.
#[derive(Debug, Clone)]
pub struct SpreadsheetDatasetSource {
    path: PathBuf,
}

impl SpreadsheetDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for SpreadsheetDatasetSource {
    async fn load(&self) -> Result<Option<Dataset>> {
        let Some(bytes) = read_optional(&self.path).await? else {
            return Ok(None);
        };

        let dataset = parse_workbook(bytes)?;
        info!(
            path = %self.path.display(),
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Loaded attribute dataset"
        );
        Ok(Some(dataset))
    }
}

/// Parse workbook bytes into a [`Dataset`]; the format is sniffed from the
/// content.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AttrSyncError::Dataset(format!("unreadable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AttrSyncError::Dataset("workbook has no worksheets".into()))?
        .map_err(|e| AttrSyncError::Dataset(format!("unreadable worksheet: {}", e)))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Dataset::default());
    };

    let columns = column_names(header);
    let cells = rows.map(|row| row.iter().map(cell_value).collect()).collect();
    Dataset::new(columns, cells)
}

/// Header cells as column names. Blank headers become `Unnamed: N` and
/// repeats get a `.1`, `.2`, ... suffix.
fn column_names(header: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (index, cell) in header.iter().enumerate() {
        let base = match cell {
            Data::Empty => format!("Unnamed: {index}"),
            other => other.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(name);
    }
    names
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER => {
            CellValue::Integer(*value as i64)
        }
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::Text(cell.to_string()), CellValue::DateTime),
    }
}
