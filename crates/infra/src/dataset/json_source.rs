//! JSON attribute dataset
//!
//! The dataset file is a JSON array of flat objects, one per spreadsheet
//! row, keyed by column header:
//!
//! ```json
//! [
//!   { "file_name": "A-101", "Contractor": "Acme", "Planned Start": "15-Jan-24", "% Completion": 40 }
//! ]
//! ```
//!
//! Column order follows first appearance across rows. A missing file is not
//! an error: the run proceeds without a dataset.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use attrsync_core::DatasetSource;
use attrsync_domain::{AttrSyncError, CellValue, Dataset, Result};
use serde_json::{Map, Value};
use tracing::info;

use super::read_optional;

/// Loads a [`Dataset`] from a JSON records file.
#[derive(Debug, Clone)]
pub struct JsonDatasetSource {
    path: PathBuf,
}

impl JsonDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for JsonDatasetSource {
    async fn load(&self) -> Result<Option<Dataset>> {
        let Some(bytes) = read_optional(&self.path).await? else {
            return Ok(None);
        };
        let contents = String::from_utf8(bytes).map_err(|e| {
            AttrSyncError::Dataset(format!("{} is not UTF-8: {}", self.path.display(), e))
        })?;

        let dataset = parse_records(&contents)?;
        info!(
            path = %self.path.display(),
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Loaded attribute dataset"
        );
        Ok(Some(dataset))
    }
}

/// Parse a JSON array of row objects into a [`Dataset`].
pub fn parse_records(contents: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| AttrSyncError::Dataset(format!("invalid JSON: {}", e)))?;

    let Value::Array(rows) = value else {
        return Err(AttrSyncError::Dataset("expected a JSON array of row objects".into()));
    };

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => record_cells(index, fields),
            other => Err(AttrSyncError::Dataset(format!(
                "row {} is not an object: {}",
                index + 1,
                other
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_records(records))
}

fn record_cells(index: usize, fields: Map<String, Value>) -> Result<Vec<(String, CellValue)>> {
    fields
        .into_iter()
        .map(|(column, value)| {
            let cell = cell_value(value).ok_or_else(|| {
                AttrSyncError::Dataset(format!(
                    "row {} column '{}' must be a scalar value",
                    index + 1,
                    column
                ))
            })?;
            Ok((column, cell))
        })
        .collect()
}

fn cell_value(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Empty),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::String(s) => Some(CellValue::Text(s)),
        Value::Number(n) => n
            .as_i64()
            .map(CellValue::Integer)
            .or_else(|| n.as_f64().map(CellValue::Float)),
        Value::Array(_) | Value::Object(_) => None,
    }
}
