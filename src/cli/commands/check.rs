//! Check command: workbook quality check without a store

use super::shared::{
    init_command, print_ridership_column_check, print_route_check, print_worksheet_check,
};
use crate::app::services::grid::Workbook;
use crate::app::services::quality::{
    WorksheetCheck, check_ridership_columns, check_route_info, check_worksheets,
};
use crate::cli::args::{Args, CheckArgs};
use crate::constants::REQUIRED_WORKSHEETS;
use anyhow::{Context, Result, bail};

/// Results of the `check` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Required worksheet presence
    pub worksheets: WorksheetCheck,

    /// Configured ridership worksheets with located period columns
    pub ridership_columns: WorksheetCheck,
}

/// Report missing worksheets and worksheets without ridership columns, and
/// optionally the routes of one worksheet
pub fn run_check(args: &Args, check_args: &CheckArgs) -> Result<CheckReport> {
    let config = init_command(args, check_args.config.as_deref())?;

    let workbook = Workbook::open(&check_args.workbook)
        .with_context(|| format!("Failed to open workbook {}", check_args.workbook.display()))?;

    let worksheets = check_worksheets(&workbook, REQUIRED_WORKSHEETS);
    print_worksheet_check(&worksheets);

    let names: Vec<&String> = config
        .worksheets
        .daily_ridership
        .iter()
        .chain(&config.worksheets.hour_productivity)
        .collect();
    let ridership_columns =
        check_ridership_columns(&workbook, &names, &config.period_locator()?)
            .context("Failed to scan ridership columns")?;
    print_ridership_column_check(&ridership_columns);

    if let Some(name) = &check_args.routes {
        let Some(worksheet) = workbook.sheet_by_name(name) else {
            bail!("Worksheet not found: '{}'", name);
        };
        print_route_check(name, &check_route_info(worksheet));
    }

    Ok(CheckReport {
        worksheets,
        ridership_columns,
    })
}
