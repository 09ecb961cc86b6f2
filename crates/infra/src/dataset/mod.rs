//! Attribute dataset sources

pub mod json_source;
pub mod spreadsheet_source;

use std::path::{Path, PathBuf};

use attrsync_core::DatasetSource;
use attrsync_domain::{AttrSyncError, Result};
use tracing::warn;

pub use json_source::JsonDatasetSource;
pub use spreadsheet_source::SpreadsheetDatasetSource;

/// Pick the source for `path` by extension: `.json` is a records file,
/// anything else is read as a workbook.
pub fn source_for_path(path: impl Into<PathBuf>) -> Box<dyn DatasetSource> {
    let path = path.into();
    if has_json_extension(&path) {
        Box::new(JsonDatasetSource::new(path))
    } else {
        Box::new(SpreadsheetDatasetSource::new(path))
    }
}

pub(crate) fn has_json_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read the dataset file; a missing file is `Ok(None)`.
async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Dataset file not found; every file will be skipped");
            Ok(None)
        }
        Err(e) => Err(AttrSyncError::Dataset(format!("failed to read {}: {}", path.display(), e))),
    }
}
