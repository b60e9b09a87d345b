//! Route directory builder
//!
//! Route identities come from the first three columns of the daily ridership
//! worksheets: route number, route name, service type. Each worksheet is
//! scanned independently, the per-worksheet results are merged (the last
//! worksheet wins for a route number), and the merged directory is upserted
//! into the store.
//!
//! - [`extraction`] - Per-worksheet route scan with header detection
//! - [`merge`] - Last-write-wins merge across worksheets
//! - [`persistence`] - Route upserts and the route-info ETL run

pub mod extraction;
pub mod merge;
pub mod persistence;

#[cfg(test)]
pub mod tests;

pub use extraction::{WorksheetRoutes, extract_routes};
pub use merge::{RouteDirectory, merge_route_data};
pub use persistence::{store_route, update_route_info};
