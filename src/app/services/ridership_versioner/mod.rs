//! Ridership fact extraction and versioning
//!
//! Each numeric cell at a (route row, period column) intersection becomes a
//! new current fact. The fact it replaces, if any, stays in the store flagged
//! non-current, so a key's full history is retained while exactly one fact per
//! (kind, route, season, year, day of week) is current.
//!
//! Cells that are not numbers, route numbers missing from the directory, and
//! indices past the sheet edge are skipped. Store integrity errors abort.
//!
//! - [`versioning`] - The deactivate-then-insert protocol for one value
//! - [`extraction`] - Worksheet scanning and the ridership ETL run

pub mod extraction;
pub mod versioning;

#[cfg(test)]
pub mod tests;

pub use extraction::{parse_worksheet_ridership, update_ridership};
pub use versioning::{VersionedFact, deactivate_current_period, version_fact};
