//! Outcome report sinks

pub mod json_sink;
pub mod spreadsheet_sink;

use std::path::{Path, PathBuf};

use attrsync_core::ReportSink;
use attrsync_domain::{AttrSyncError, Result};

use crate::dataset::has_json_extension;

pub use json_sink::JsonReportSink;
pub use spreadsheet_sink::SpreadsheetReportSink;

/// Pick the sink for `path` by extension: `.json` gets JSON records,
/// anything else a workbook.
pub fn sink_for_path(path: impl Into<PathBuf>) -> Box<dyn ReportSink> {
    let path = path.into();
    if has_json_extension(&path) {
        Box::new(JsonReportSink::new(path))
    } else {
        Box::new(SpreadsheetReportSink::new(path))
    }
}

/// Write `body` to `path`, creating missing parent directories.
async fn write_report_file(path: &Path, body: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AttrSyncError::Report(format!("failed to create {}: {}", parent.display(), e))
        })?;
    }

    tokio::fs::write(path, body)
        .await
        .map_err(|e| AttrSyncError::Report(format!("failed to write {}: {}", path.display(), e)))
}
