//! Ridership store: the repository the ETL services read and write
//!
//! The services never talk to a concrete database. They take a
//! `&mut dyn RidershipStore` (or any `S: RidershipStore`) and exchange plain
//! records with it. The store is responsible for integrity: it rejects a
//! second current fact for the same key, a fact whose route does not exist,
//! and a duplicate route number.
//!
//! - [`memory`] - `InMemoryStore`, the bundled implementation
//! - [`snapshot`] - JSON snapshot persistence for `InMemoryStore`

use crate::Result;
use crate::app::models::{
    EtlReport, NewRidershipFact, PeriodKey, RidershipFact, RidershipKind, Route, SystemRidership,
    SystemTrend, UpsertOutcome, WeeklyPerformance,
};
use chrono::{DateTime, Utc};

pub mod memory;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

pub use memory::InMemoryStore;

/// Repository interface consumed by the ETL services
///
/// Lookups that can legitimately find nothing return `Option`. Methods return
/// `Err` only for integrity violations and persistence failures.
pub trait RidershipStore {
    // Routes

    /// Unique lookup by public route number
    fn find_route_by_number(&self, route_number: i64) -> Option<Route>;

    fn route(&self, route_id: u64) -> Option<Route>;

    /// Insert a new route; fails if the route number is taken
    fn insert_route(
        &mut self,
        route_number: i64,
        route_name: &str,
        service_type: &str,
    ) -> Result<Route>;

    /// Overwrite name, service type and flag of an existing route
    fn update_route(&mut self, route: &Route) -> Result<()>;

    /// All routes in insertion order
    fn routes(&self) -> Vec<Route>;

    fn count_routes(&self) -> usize;

    /// Clear the high-ridership flag on every route, returning how many were set
    fn clear_high_ridership(&mut self) -> usize;

    fn set_high_ridership(&mut self, route_id: u64) -> Result<()>;

    // Ridership facts

    /// The current fact of a kind for a route and period
    ///
    /// More than one current fact for the key is an integrity violation.
    fn find_current_fact(
        &self,
        kind: RidershipKind,
        route_id: u64,
        period: PeriodKey,
    ) -> Result<Option<RidershipFact>>;

    fn set_fact_current(
        &mut self,
        kind: RidershipKind,
        fact_id: u64,
        is_current: bool,
    ) -> Result<()>;

    /// Insert a fact as the current one for its key
    ///
    /// Callers must deactivate the previous current fact first.
    fn insert_fact(&mut self, fact: NewRidershipFact) -> Result<RidershipFact>;

    /// Full history of a kind, in insertion order
    fn facts(&self, kind: RidershipKind) -> Vec<RidershipFact>;

    fn current_facts(&self, kind: RidershipKind) -> Vec<RidershipFact>;

    fn count_facts(&self, kind: RidershipKind) -> usize;

    // Weekly performance

    /// Insert or replace the row for `(route_id, season, calendar_year)`
    ///
    /// The record's `id` is ignored; the stored row keeps its original id.
    fn upsert_weekly_performance(&mut self, record: WeeklyPerformance) -> Result<UpsertOutcome>;

    fn weekly_performances(&self) -> Vec<WeeklyPerformance>;

    // System ridership

    /// Flag every active system ridership row inactive, returning the count
    fn deactivate_system_ridership(&mut self) -> usize;

    /// Insert an active row; fails if an active row exists for the same
    /// period and service type
    fn insert_system_ridership(&mut self, record: SystemRidership) -> Result<SystemRidership>;

    fn system_ridership(&self) -> Vec<SystemRidership>;

    fn active_system_ridership(&self) -> Vec<SystemRidership>;

    // System trends

    /// Insert or replace the trend of a service type
    fn upsert_system_trend(
        &mut self,
        service_type: &str,
        trend: String,
        updated_on: DateTime<Utc>,
    ) -> Result<UpsertOutcome>;

    /// Delete every trend whose service type is not listed, returning the count
    fn retain_system_trends(&mut self, service_types: &[String]) -> usize;

    fn system_trends(&self) -> Vec<SystemTrend>;

    // ETL reports

    /// Append an audit record, returning it with its assigned id
    fn insert_report(&mut self, report: EtlReport) -> Result<EtlReport>;

    fn reports(&self) -> Vec<EtlReport>;

    /// Flush pending changes to durable storage
    fn commit(&mut self) -> Result<()>;
}
