//! Writes the outcome report as a JSON array of
//! `{ "file", "status", "reason"?, "attrs"? }` records.

use std::path::PathBuf;

use async_trait::async_trait;
use attrsync_core::ReportSink;
use attrsync_domain::{AttrSyncError, Result, SyncReport};
use tracing::info;

use super::write_report_file;

#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSink for JsonReportSink {
    async fn write(&self, report: &SyncReport) -> Result<()> {
        let body = serde_json::to_string_pretty(&report.records())
            .map_err(|e| AttrSyncError::Report(format!("failed to serialise report: {}", e)))?;

        write_report_file(&self.path, body.as_bytes()).await?;

        info!(path = %self.path.display(), records = report.outcomes().len(), "Report written");
        Ok(())
    }
}
