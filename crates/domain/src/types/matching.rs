//! Row matching results

use serde::{Deserialize, Serialize};

use super::dataset::AttributeRow;

/// Rule that associated a dataset row with a remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// `file_name` column equals the file name or its stem
    FileNameColumn,
    /// `acc_file_id` holds a URN equal to the file's id
    Urn,
    /// `acc_file_id` holds a plain file name
    FilenameInAccFileId,
    /// Dataset has a single row, applied to every file
    SingleRow,
    #[serde(rename = "not_matched")]
    None,
}

crate::impl_domain_status_conversions!(MatchStrategy {
    FileNameColumn => "file_name_column",
    Urn => "urn",
    FilenameInAccFileId => "filename_in_acc_file_id",
    SingleRow => "single_row",
    None => "not_matched",
});

/// Outcome of matching one file against the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub row: Option<&'a AttributeRow>,
    pub strategy: MatchStrategy,
}

impl<'a> MatchResult<'a> {
    pub fn matched(row: &'a AttributeRow, strategy: MatchStrategy) -> Self {
        Self { row: Some(row), strategy }
    }

    pub fn none() -> Self {
        Self { row: None, strategy: MatchStrategy::None }
    }

    pub fn is_match(&self) -> bool {
        self.row.is_some()
    }
}
