//! Tests for loading workbooks from CSV worksheet exports

use super::*;
use crate::Error;
use crate::app::services::grid::{Grid, Workbook};
use tempfile::TempDir;

#[test]
fn test_open_loads_sheets_by_file_stem() {
    let temp_dir = TempDir::new().unwrap();
    write_sample_workbook(temp_dir.path()).unwrap();
    write_sheet_csv(temp_dir.path(), "Riders per Hour Weekday", &[&["Route"], &["1"]]).unwrap();

    let workbook = Workbook::open(temp_dir.path()).unwrap();

    assert_eq!(workbook.sheets().len(), 2);
    let sheet = workbook.sheet_by_name("Ridership by Route Weekday").unwrap();
    assert_eq!(sheet.text(1, 3), Some("Spring 2015"));
    assert_eq!(sheet.number(4, 3), Some(12000.5));
    assert!(workbook.sheet_by_name("Riders per Hour Weekday").is_some());
    assert_eq!(workbook.source(), Some(temp_dir.path()));
}

#[test]
fn test_open_directory_with_bracketed_name() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_dir = temp_dir.path().join("ridership [2016]");
    std::fs::create_dir(&workbook_dir).unwrap();
    write_sample_workbook(&workbook_dir).unwrap();

    let workbook = Workbook::open(&workbook_dir).unwrap();

    assert_eq!(workbook.sheet_names(), vec!["Ridership by Route Weekday"]);
    assert!(workbook.require_sheet("Ridership by Route Weekday").is_ok());
}

#[test]
fn test_missing_sheet() {
    let workbook = Workbook::from_sheets(vec![sheet_from_rows("Only", SAMPLE_ROWS)]);

    assert!(workbook.sheet_by_name("Other").is_none());
    assert!(matches!(
        workbook.require_sheet("Other"),
        Err(Error::WorksheetNotFound { .. })
    ));
    assert_eq!(workbook.sheet_names(), vec!["Only"]);
}

#[test]
fn test_open_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let result = Workbook::open(&temp_dir.path().join("missing"));

    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_open_rejects_plain_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("export.csv");
    std::fs::write(&file, "Route\n1\n").unwrap();

    let result = Workbook::open(&file);

    assert!(matches!(result, Err(Error::Configuration { .. })));
}
