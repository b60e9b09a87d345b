//! Command implementations for the ridership ETL CLI
//!
//! Each command lives in its own module:
//! - `etl`: full workbook import and aggregation
//! - `tables`: store snapshot creation
//! - `check`: worksheet presence, ridership columns and route listing
//! - `snapshot`: JSON export of reporting data

pub mod check;
pub mod etl;
pub mod shared;
pub mod snapshot;
pub mod tables;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Dispatch to the subcommand handler
///
/// With no subcommand this does nothing; the binary shows help instead.
pub fn run(args: Args) -> Result<()> {
    let Some(command) = &args.command else {
        return Ok(());
    };

    match command {
        Commands::Etl(etl_args) => etl::run_etl(&args, etl_args).map(|_| ()),
        Commands::Tables(tables_args) => tables::run_tables(&args, tables_args),
        Commands::Check(check_args) => check::run_check(&args, check_args).map(|_| ()),
        Commands::Snapshot(snapshot_args) => snapshot::run_snapshot(&args, snapshot_args),
    }
}
