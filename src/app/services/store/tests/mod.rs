//! Shared test utilities and fixtures for store tests

use crate::app::models::{DayOfWeek, NewRidershipFact, PeriodKey, RidershipKind, Season};
use crate::app::services::store::{InMemoryStore, RidershipStore};
use chrono::{DateTime, TimeZone, Utc};


pub fn spring_2015_weekday() -> PeriodKey {
    PeriodKey::new(Season::Spring, 2015, DayOfWeek::Weekday)
}

pub fn spring_2015_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 3, 30, 5, 0, 0).unwrap()
}

pub fn new_fact(
    kind: RidershipKind,
    route_id: u64,
    period: PeriodKey,
    ridership: f64,
) -> NewRidershipFact {
    NewRidershipFact {
        kind,
        route_id,
        period,
        ridership,
        measurement_timestamp: spring_2015_timestamp(),
        created_on: Utc::now(),
    }
}

/// Store with routes 1 (LOCAL) and 801 (METRORAPID)
pub fn store_with_routes() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store
        .insert_route(1, "1-NORTH LAMAR/SOUTH CONGRESS", "LOCAL")
        .unwrap();
    store
        .insert_route(801, "801-METRORAPID NORTH/SOUTH", "METRORAPID")
        .unwrap();
    store
}
