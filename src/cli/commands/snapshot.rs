//! Snapshot command: export reporting data as JSON

use super::shared::{init_command, open_store};
use crate::app::services::aggregation::{
    productivity_series, route_sparklines, top_route_compendiums,
};
use crate::cli::args::{Args, SnapshotArgs, SnapshotKind};
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

pub fn run_snapshot(args: &Args, snapshot_args: &SnapshotArgs) -> Result<()> {
    let config = init_command(args, snapshot_args.config.as_deref())?;
    let store = open_store(&config)?;

    let json = match snapshot_args.kind {
        SnapshotKind::Sparklines => {
            let calibrator = *config.period_locator()?.calibrator();
            serde_json::to_string_pretty(&route_sparklines(&store, &calibrator)?)?
        }
        SnapshotKind::TopRoutes => serde_json::to_string_pretty(&top_route_compendiums(&store))?,
        SnapshotKind::Productivity => {
            serde_json::to_string_pretty(&productivity_series(&store))?
        }
    };

    match &snapshot_args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {:?} snapshot to {}", snapshot_args.kind, path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
