//! Writes the outcome report as a single-sheet workbook with the columns
//! `file`, `status`, `reason`, `attrs`.

use std::path::PathBuf;

use async_trait::async_trait;
use attrsync_core::ReportSink;
use attrsync_domain::{AttrSyncError, ReportRecord, Result, SyncReport};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use super::write_report_file;

const REPORT_COLUMNS: [&str; 4] = ["file", "status", "reason", "attrs"];

#[derive(Debug, Clone)]
pub struct SpreadsheetReportSink {
    path: PathBuf,
}

impl SpreadsheetReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSink for SpreadsheetReportSink {
    async fn write(&self, report: &SyncReport) -> Result<()> {
        let body = render_workbook(&report.records())
            .map_err(|e| AttrSyncError::Report(format!("failed to build workbook: {}", e)))?;

        write_report_file(&self.path, &body).await?;

        info!(path = %self.path.display(), records = report.outcomes().len(), "Report written");
        Ok(())
    }
}

fn render_workbook(records: &[ReportRecord]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, title) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, title, &bold)?;
    }

    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, &record.file)?;
        sheet.write_string(row, 1, record.status.to_string())?;
        if let Some(reason) = &record.reason {
            sheet.write_string(row, 2, reason)?;
        }
        if let Some(attrs) = record.attrs {
            sheet.write_number(row, 3, attrs as f64)?;
        }
    }

    workbook.save_to_buffer()
}
