//! Shared test utilities and fixtures for grid tests

use crate::app::services::grid::Worksheet;
use std::fs;
use std::path::Path;

pub mod cell_tests;
pub mod workbook_tests;

/// Build a worksheet from raw strings; blank strings become empty cells
pub fn sheet_from_rows(name: &str, rows: &[&[&str]]) -> Worksheet {
    Worksheet::from_raw_rows(name, rows.iter().map(|row| row.iter().copied()))
}

/// Write a CSV worksheet export into a workbook directory
pub fn write_sheet_csv(dir: &Path, name: &str, rows: &[&[&str]]) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(dir.join(format!("{}.csv", name)))?;
    for row in rows {
        writer.write_record(row.iter())?;
    }
    writer.flush()?;
    Ok(())
}

/// Standard worksheet with a route header row and two seasons of weekday data
pub const SAMPLE_ROWS: &[&[&str]] = &[
    &["Ridership by Route Weekday", "", "", ""],
    &["", "", "", "Spring 2015", "Fall 2015"],
    &["", "", "", "Weekday", "Weekday"],
    &["Route", "Route Name", "Route Type", "", ""],
    &["1", "1-North Lamar/South Congress", "Local", "12000.5", "12500"],
    &["2", "2-Rosewood", "Local", "900", ""],
];

pub fn write_sample_workbook(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    write_sheet_csv(dir, "Ridership by Route Weekday", SAMPLE_ROWS)
}
