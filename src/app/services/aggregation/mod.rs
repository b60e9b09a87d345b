//! Aggregation engine
//!
//! Recompute passes over the current fact set. Every pass is idempotent: it
//! replaces what it derived last time instead of accumulating onto it, and
//! commits the store when done.
//!
//! - [`system_ridership`] - System-wide totals per period and service type
//! - [`system_trend`] - Weekly-weighted trend per service type
//! - [`weekly_performance`] - Weekly ridership and productivity per route and season
//! - [`high_ridership`] - Top routes by latest weekday ridership
//! - [`snapshots`] - Read-only views for report rendering

pub mod high_ridership;
pub mod snapshots;
pub mod system_ridership;
pub mod system_trend;
pub mod weekly_performance;

#[cfg(test)]
pub mod tests;

pub use high_ridership::{
    get_high_ridership_routes, get_latest_measurement_timestamp, update_high_ridership_routes,
};
pub use snapshots::{
    ProductivityPeriod, RoutePerformance, SparkPoint, SparklineCompendium, TopRouteCompendium,
    productivity_series, route_sparklines, top_route_compendiums,
};
pub use system_ridership::{deactivate_previous_system_ridership, update_system_ridership};
pub use system_trend::{build_trend_points, update_system_trends};
pub use weekly_performance::update_weekly_performance;
