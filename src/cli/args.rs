//! Command-line argument definitions for the ridership ETL
//!
//! The CLI is a thin shell over the library: every command loads a
//! [`Config`](crate::config::Config), opens the store it names and calls one
//! library entry point.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ridership ETL
///
/// Imports periodically-updated transit ridership workbooks into a versioned
/// store and recomputes the aggregates behind the ridership dashboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ridership-etl",
    version,
    about = "Import transit ridership workbooks into a versioned ridership store",
    long_about = "Reads a ridership workbook exported as one CSV file per worksheet, locates the \
                  season and day-of-week periods in each worksheet, versions every route's \
                  ridership per period and recomputes system ridership, trends, weekly \
                  performance and the high-ridership route ranking."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full ETL over a workbook
    Etl(EtlArgs),
    /// Create the store snapshot if it does not exist
    Tables(TablesArgs),
    /// Check that a workbook has the expected worksheets
    Check(CheckArgs),
    /// Export reporting data from the store as JSON
    Snapshot(SnapshotArgs),
}

/// Arguments for the etl command
#[derive(Debug, Clone, Parser)]
pub struct EtlArgs {
    /// Directory holding one `<worksheet name>.csv` per worksheet
    #[arg(value_name = "WORKBOOK", help = "Workbook directory of CSV worksheet exports")]
    pub workbook: PathBuf,

    /// TOML configuration file
    ///
    /// Falls back to the user config directory, then to built-in defaults.
    #[arg(value_name = "CONFIG", help = "Path to configuration file (TOML format)")]
    pub config: Option<PathBuf>,

    /// Print a test message and exit without touching the store
    #[arg(long = "test", help = "Print a test message and exit")]
    pub test: bool,
}

/// Arguments for the tables command
#[derive(Debug, Clone, Parser)]
pub struct TablesArgs {
    #[arg(value_name = "CONFIG", help = "Path to configuration file (TOML format)")]
    pub config: Option<PathBuf>,

    #[arg(long = "test", help = "Print a test message and exit")]
    pub test: bool,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    #[arg(value_name = "WORKBOOK", help = "Workbook directory of CSV worksheet exports")]
    pub workbook: PathBuf,

    /// Configuration naming the ridership worksheets and the agency timezone
    #[arg(value_name = "CONFIG", help = "Path to configuration file (TOML format)")]
    pub config: Option<PathBuf>,

    /// Also list the routes found in this worksheet
    #[arg(
        long = "routes",
        value_name = "WORKSHEET",
        help = "List the route numbers and names found in a worksheet"
    )]
    pub routes: Option<String>,
}

/// Arguments for the snapshot command
#[derive(Debug, Clone, Parser)]
pub struct SnapshotArgs {
    #[arg(value_enum, value_name = "KIND", help = "Reporting data to export")]
    pub kind: SnapshotKind,

    #[arg(value_name = "CONFIG", help = "Path to configuration file (TOML format)")]
    pub config: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (defaults to stdout)"
    )]
    pub output: Option<PathBuf>,
}

/// Reporting data sets that can be exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotKind {
    /// Weekly-weighted ridership series per route
    Sparklines,
    /// Current daily facts of the high-ridership routes
    TopRoutes,
    /// Weekly productivity grouped by period
    Productivity,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
