//! Workbook dataset source and report sink against real files.

use std::path::Path;

use attrsync_core::{DatasetSource, ReportSink};
use attrsync_domain::{AttrSyncError, CellValue, SyncOutcome, SyncReport};
use attrsync_infra::{
    sink_for_path, source_for_path, SpreadsheetDatasetSource, SpreadsheetReportSink,
};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

/// Header row plus two rows, with a date cell and numeric cells.
fn write_attribute_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let headers = ["file_name", "acc_file_id", "Planned Start", "% Completion", "Contractor"];
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string(0, col, title).unwrap();
    }

    sheet.write_string(1, 0, "A-101").unwrap();
    sheet.write_string(1, 1, "urn:adsk.wipprod:dm.lineage:abc").unwrap();
    let start = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
    sheet.write_datetime_with_format(1, 2, &start, &date_format).unwrap();
    sheet.write_number(1, 3, 40).unwrap();
    sheet.write_string(1, 4, "Acme Ltd").unwrap();

    sheet.write_string(2, 0, "A-102").unwrap();
    sheet.write_number(2, 3, 12.5).unwrap();

    workbook.save(path).unwrap();
}

#[tokio::test]
async fn loads_first_sheet_in_column_and_row_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("acc_file_attributes.xlsx");
    write_attribute_workbook(&path);

    let dataset =
        SpreadsheetDatasetSource::new(&path).load().await.unwrap().expect("dataset present");

    assert_eq!(
        dataset.columns(),
        ["file_name", "acc_file_id", "Planned Start", "% Completion", "Contractor"]
    );
    assert_eq!(dataset.len(), 2);

    let first = &dataset.rows()[0];
    assert_eq!(first.text("file_name").as_deref(), Some("A-101"));
    assert_eq!(first.text("acc_file_id").as_deref(), Some("urn:adsk.wipprod:dm.lineage:abc"));
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(first.get("Planned Start"), Some(&CellValue::DateTime(start)));
    assert_eq!(first.get("% Completion"), Some(&CellValue::Integer(40)));

    let second = &dataset.rows()[1];
    assert_eq!(second.text("file_name").as_deref(), Some("A-102"));
    assert_eq!(second.get("% Completion"), Some(&CellValue::Float(12.5)));
    assert!(second.get("Contractor").is_some_and(CellValue::is_blank));
}

#[tokio::test]
async fn missing_workbook_means_no_dataset() {
    let dir = TempDir::new().unwrap();
    let source = SpreadsheetDatasetSource::new(dir.path().join("acc_file_attributes.xlsx"));

    assert_eq!(source.load().await.unwrap(), None);
}

#[tokio::test]
async fn corrupt_workbook_is_a_dataset_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("acc_file_attributes.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    let result = SpreadsheetDatasetSource::new(&path).load().await;
    assert!(matches!(result, Err(AttrSyncError::Dataset(_))));
}

#[tokio::test]
async fn source_is_chosen_by_extension() {
    let dir = TempDir::new().unwrap();
    let xlsx = dir.path().join("rows.xlsx");
    write_attribute_workbook(&xlsx);
    let json = dir.path().join("rows.JSON");
    std::fs::write(&json, r#"[{ "file_name": "A-201" }]"#).unwrap();

    let from_xlsx = source_for_path(&xlsx).load().await.unwrap().expect("xlsx dataset");
    assert_eq!(from_xlsx.len(), 2);

    let from_json = source_for_path(&json).load().await.unwrap().expect("json dataset");
    assert_eq!(from_json.rows()[0].text("file_name").as_deref(), Some("A-201"));
}

#[tokio::test]
async fn report_workbook_has_one_row_per_outcome() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("bulk_update_results.xlsx");

    let mut report = SyncReport::new();
    report.push(SyncOutcome::success("urn:1", "A/x.pdf", 3));
    report.push(SyncOutcome::failed("urn:2", "A/y.pdf", "Status 400"));
    report.push(SyncOutcome::skipped("urn:3", "A/z.pdf", "not_matched"));

    SpreadsheetReportSink::new(&path).write(&report).await.unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    let text = |s: &str| Data::String(s.to_string());

    assert_eq!(range.height(), 4);
    let header: Vec<&Data> = (0..4).filter_map(|col| range.get_value((0, col))).collect();
    assert_eq!(header, [&text("file"), &text("status"), &text("reason"), &text("attrs")]);

    assert_eq!(range.get_value((1, 0)), Some(&text("A/x.pdf")));
    assert_eq!(range.get_value((1, 1)), Some(&text("success")));
    assert_eq!(range.get_value((1, 3)).and_then(DataType::as_f64), Some(3.0));
    assert_eq!(range.get_value((2, 2)), Some(&text("Status 400")));
    assert_eq!(range.get_value((3, 1)), Some(&text("skipped")));
    assert_eq!(range.get_value((3, 2)), Some(&text("not_matched")));
}

#[tokio::test]
async fn report_sink_is_chosen_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");

    let mut report = SyncReport::new();
    report.push(SyncOutcome::success("urn:1", "x.pdf", 1));
    sink_for_path(&path).write(&report).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.trim_start().starts_with('['));
}
