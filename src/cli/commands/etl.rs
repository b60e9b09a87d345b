//! Etl command: full import of one workbook

use super::shared::{create_spinner, init_command, open_store, print_etl_summary};
use crate::app::services::grid::Workbook;
use crate::app::services::pipeline::{EtlRunSummary, run_excel_etl};
use crate::cli::args::{Args, EtlArgs};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Run the full ETL, or just print the test banner with `--test`
///
/// Returns `None` for a test run.
pub fn run_etl(args: &Args, etl_args: &EtlArgs) -> Result<Option<EtlRunSummary>> {
    if etl_args.test {
        println!("Ridership ETL test.");
        return Ok(None);
    }

    println!("Ridership ETL starting...");
    let config = init_command(args, etl_args.config.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    let workbook = Workbook::open(&etl_args.workbook)
        .with_context(|| format!("Failed to open workbook {}", etl_args.workbook.display()))?;
    info!(
        "Workbook {} has {} worksheets",
        etl_args.workbook.display(),
        workbook.sheets().len()
    );

    let mut store = open_store(&config)?;

    let spinner = create_spinner("Importing ridership...", args.quiet);
    let result = run_excel_etl(&workbook, &mut store, &config);
    spinner.finish_and_clear();

    let summary = result.context("Ridership ETL failed")?;
    if !args.quiet {
        print_etl_summary(&summary);
    }
    Ok(Some(summary))
}
