//! Dataset row matching
//!
//! Finds the dataset row that describes a remote file. Strategies run in a
//! fixed priority order and the first one that finds a row wins:
//!
//! 1. `file_name` column equals the file name or its stem
//! 2. `acc_file_id` column, per row:
//!    - values containing an identifier marker are URNs compared with the
//!      file id
//!    - other values are file names compared with the file name
//! 3. a single-row dataset applies to every file
//!
//! Within a strategy the first row in dataset order wins. Each
//! `acc_file_id` row is classified once by the marker test and only ever
//! evaluated under that classification.

use attrsync_domain::constants::{
    FILE_ID_COLUMN, FILE_NAME_COLUMN, IDENTIFIER_MARKERS, URN_SCHEME_PREFIX,
};
use attrsync_domain::{Dataset, MatchResult, MatchStrategy};

/// The file being matched.
#[derive(Debug, Clone, Copy)]
pub struct MatchTarget<'f> {
    pub name: &'f str,
    pub stem: &'f str,
    pub id: &'f str,
}

impl<'f> MatchTarget<'f> {
    pub fn new(name: &'f str, id: &'f str) -> Self {
        Self { name, stem: strip_extension(name), id }
    }
}

type Strategy = for<'d> fn(&MatchTarget<'_>, &'d Dataset) -> Option<MatchResult<'d>>;

const STRATEGIES: [Strategy; 3] = [by_file_name_column, by_file_id_column, single_row_fallback];

/// Select the row of `dataset` that describes the file `file_name` / `file_id`.
pub fn match_row<'d>(file_name: &str, file_id: &str, dataset: &'d Dataset) -> MatchResult<'d> {
    let target = MatchTarget::new(file_name, file_id);
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&target, dataset))
        .unwrap_or_else(MatchResult::none)
}

fn by_file_name_column<'d>(target: &MatchTarget<'_>, dataset: &'d Dataset) -> Option<MatchResult<'d>> {
    if !dataset.has_column(FILE_NAME_COLUMN) {
        return None;
    }

    dataset
        .rows()
        .iter()
        .find(|row| {
            row.text(FILE_NAME_COLUMN)
                .is_some_and(|value| value == target.name || value == target.stem)
        })
        .map(|row| MatchResult::matched(row, MatchStrategy::FileNameColumn))
}

fn by_file_id_column<'d>(target: &MatchTarget<'_>, dataset: &'d Dataset) -> Option<MatchResult<'d>> {
    if !dataset.has_column(FILE_ID_COLUMN) {
        return None;
    }

    dataset.rows().iter().find_map(|row| {
        let value = row.text(FILE_ID_COLUMN)?;
        let strategy = match FileIdValue::classify(&value) {
            FileIdValue::Urn(urn) if urn == target.id => MatchStrategy::Urn,
            FileIdValue::FileName(name) if file_name_matches(name, target) => {
                MatchStrategy::FilenameInAccFileId
            }
            _ => return None,
        };
        Some(MatchResult::matched(row, strategy))
    })
}

fn single_row_fallback<'d>(_: &MatchTarget<'_>, dataset: &'d Dataset) -> Option<MatchResult<'d>> {
    match dataset.rows() {
        [only] => Some(MatchResult::matched(only, MatchStrategy::SingleRow)),
        _ => None,
    }
}

/// An `acc_file_id` cell, classified by the identifier-marker test.
#[derive(Debug, PartialEq, Eq)]
enum FileIdValue<'v> {
    Urn(String),
    FileName(&'v str),
}

impl<'v> FileIdValue<'v> {
    fn classify(value: &'v str) -> Self {
        if is_remote_identifier(value) {
            Self::Urn(normalize_urn(value))
        } else {
            Self::FileName(value)
        }
    }
}

/// Whether `value` looks like a remote identifier rather than a file name.
pub fn is_remote_identifier(value: &str) -> bool {
    IDENTIFIER_MARKERS.iter().any(|marker| value.contains(marker))
}

/// Prefix the `urn:` scheme when it is missing.
pub fn normalize_urn(value: &str) -> String {
    if value.starts_with(URN_SCHEME_PREFIX) {
        value.to_string()
    } else {
        format!("{URN_SCHEME_PREFIX}{value}")
    }
}

/// File name without its last `.extension` segment.
pub fn strip_extension(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

fn file_name_matches(value: &str, target: &MatchTarget<'_>) -> bool {
    value == target.name || value == target.stem || strip_extension(value) == target.stem
}
