//! Tables command: create the store snapshot

use super::shared::{init_command, open_store};
use crate::app::services::store::RidershipStore;
use crate::cli::args::{Args, TablesArgs};
use anyhow::{Context, Result};
use tracing::info;

/// Create the configured store snapshot if it is missing
///
/// An existing snapshot is loaded and written back unchanged.
pub fn run_tables(args: &Args, tables_args: &TablesArgs) -> Result<()> {
    if tables_args.test {
        println!("Ridership ETL test.");
        return Ok(());
    }

    let config = init_command(args, tables_args.config.as_deref())?;
    let existed = config.store.path.exists();

    let mut store = open_store(&config)?;
    store.commit().context("Failed to write store snapshot")?;

    if existed {
        info!("Store {} already exists", config.store.path.display());
    } else {
        info!("Created store {}", config.store.path.display());
    }
    println!("Ridership store initialized.");
    Ok(())
}
