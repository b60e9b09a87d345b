//! JSON snapshot persistence for the in-memory store

use super::memory::StoreTables;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read store tables from a snapshot file
pub fn load(path: &Path) -> Result<StoreTables> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::io(format!("Failed to read store snapshot {}", path.display()), e)
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        Error::serialization(format!("Invalid store snapshot {}", path.display()), e)
    })
}

/// Write store tables to a snapshot file
///
/// The snapshot is written next to the target and renamed into place so a
/// failed write never leaves a truncated snapshot behind.
pub fn save(path: &Path, tables: &StoreTables) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }

    let contents = serde_json::to_string_pretty(tables)
        .map_err(|e| Error::serialization("Failed to encode store snapshot", e))?;

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, contents).map_err(|e| {
        Error::io(format!("Failed to write store snapshot {}", staging.display()), e)
    })?;
    fs::rename(&staging, path).map_err(|e| {
        Error::io(format!("Failed to replace store snapshot {}", path.display()), e)
    })?;

    debug!("Committed store snapshot to {}", path.display());
    Ok(())
}
