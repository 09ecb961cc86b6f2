//! Tabular attribute dataset types
//!
//! A [`Dataset`] is the in-memory form of the attribute spreadsheet: an
//! ordered list of column names and an ordered list of rows. Row order is
//! significant (the matcher picks the first matching row), so it is preserved
//! exactly as loaded.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AttrSyncError, Result};

/// A single scalar spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Stringified, trimmed value; `None` for empty or whitespace-only cells
    /// and for non-finite numbers.
    pub fn as_text(&self) -> Option<String> {
        let rendered = match self {
            Self::Empty => return None,
            Self::Text(text) => text.trim().to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) if !value.is_finite() => return None,
            Self::Float(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// One dataset row: cells keyed by column name, in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributeRow {
    cells: Vec<(String, CellValue)>,
}

impl AttributeRow {
    /// Cell for `column`, if the dataset has that column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    /// Trimmed text of `column`; `None` when the column is missing or blank.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(CellValue::as_text)
    }

    /// Cells in dataset column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Rows × named columns, row order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<AttributeRow>,
}

impl Dataset {
    /// Build a dataset from positional rows.
    ///
    /// # Errors
    /// Returns `AttrSyncError::Dataset` if a column name repeats or a row's
    /// width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].contains(column) {
                return Err(AttrSyncError::Dataset(format!("duplicate column: {column}")));
            }
        }

        let mut built = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AttrSyncError::Dataset(format!(
                    "row {} has {} cells, expected {}",
                    index + 1,
                    row.len(),
                    columns.len()
                )));
            }
            built.push(AttributeRow { cells: columns.iter().cloned().zip(row).collect() });
        }

        Ok(Self { columns, rows: built })
    }

    /// Build a dataset from keyed records (e.g. JSON objects).
    ///
    /// The column set is the union of keys in first-seen order; a record
    /// lacking a column gets [`CellValue::Empty`] there, so every row ends up
    /// with the same column set.
    pub fn from_records(records: Vec<Vec<(String, CellValue)>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for (name, _) in record {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        let value = record
                            .iter()
                            .position(|(name, _)| name == column)
                            .map(|pos| record.swap_remove(pos).1)
                            .unwrap_or_default();
                        (column.clone(), value)
                    })
                    .collect();
                AttributeRow { cells }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn rows(&self) -> &[AttributeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
