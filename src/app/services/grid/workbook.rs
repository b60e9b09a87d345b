//! Workbook loading from CSV worksheet exports
//!
//! A workbook on disk is a directory holding one CSV file per worksheet,
//! named `<worksheet name>.csv`. Cells are typed on load.

use super::{Grid, Worksheet};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A set of named worksheets
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    source: Option<PathBuf>,
    sheets: Vec<Worksheet>,
}

impl Workbook {
    /// Build a workbook from worksheets already in memory
    pub fn from_sheets(sheets: Vec<Worksheet>) -> Self {
        Self {
            source: None,
            sheets,
        }
    }

    /// Load every `*.csv` file in a directory as a worksheet
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        if !path.is_dir() {
            return Err(Error::configuration(format!(
                "Workbook path '{}' is not a directory of worksheet CSV files",
                path.display()
            )));
        }

        // Directory names may contain glob metacharacters such as `[2016]`
        let directory = glob::Pattern::escape(&path.to_string_lossy());
        let pattern = Path::new(&directory).join("*.csv");
        let pattern = pattern.to_string_lossy();
        let entries = glob::glob(&pattern).map_err(|e| {
            Error::configuration(format!("Invalid workbook path pattern '{}': {}", pattern, e))
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let file = entry.map_err(|e| {
                Error::io(
                    format!("Failed to read workbook entry in '{}'", path.display()),
                    e.into_error(),
                )
            })?;
            files.push(file);
        }
        files.sort();

        let mut sheets = Vec::with_capacity(files.len());
        for file in &files {
            sheets.push(load_worksheet(file)?);
        }

        info!(
            "Opened workbook {} with {} worksheets",
            path.display(),
            sheets.len()
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            sheets,
        })
    }

    /// Worksheet with the given name, if present
    pub fn sheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    /// Worksheet with the given name, or a `WorksheetNotFound` error
    pub fn require_sheet(&self, name: &str) -> Result<&Worksheet> {
        self.sheet_by_name(name)
            .ok_or_else(|| Error::worksheet_not_found(name))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name()).collect()
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Load one CSV file as a worksheet named after the file stem
fn load_worksheet(file: &Path) -> Result<Worksheet> {
    let name = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::file_not_found(file.display().to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(file)
        .map_err(|e| {
            Error::csv_parsing(
                file.display().to_string(),
                "Failed to open worksheet",
                Some(e),
            )
        })?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            Error::csv_parsing(
                file.display().to_string(),
                "Failed to read worksheet row",
                Some(e),
            )
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let sheet = Worksheet::from_raw_rows(name, rows);
    debug!(
        "Loaded worksheet '{}': {} rows x {} columns",
        sheet.name(),
        sheet.row_count(),
        sheet.column_count()
    );
    Ok(sheet)
}
