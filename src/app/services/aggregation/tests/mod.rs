//! Shared test utilities and fixtures for aggregation tests

use crate::app::models::{
    DayOfWeek, NewRidershipFact, PeriodKey, RidershipFact, RidershipKind, Season,
};
use crate::app::services::period_locator::PeriodCalibrator;
use crate::app::services::store::{InMemoryStore, RidershipStore};
use chrono::Utc;


pub fn calibrator() -> PeriodCalibrator {
    PeriodCalibrator::new(chrono_tz::America::Chicago)
}

pub fn add_route(store: &mut InMemoryStore, route_number: i64, service_type: &str) -> u64 {
    store
        .insert_route(
            route_number,
            &format!("TEST ROUTE {}", route_number),
            service_type,
        )
        .unwrap()
        .id
}

/// Insert a current fact stamped with its period's canonical timestamp
pub fn add_fact(
    store: &mut InMemoryStore,
    kind: RidershipKind,
    route_id: u64,
    period: PeriodKey,
    ridership: f64,
) -> RidershipFact {
    let measurement_timestamp = calibrator()
        .canonical_timestamp(period.day_of_week, period.season, period.calendar_year)
        .unwrap();
    store
        .insert_fact(NewRidershipFact {
            kind,
            route_id,
            period,
            ridership,
            measurement_timestamp,
            created_on: Utc::now(),
        })
        .unwrap()
}

pub fn period(season: Season, calendar_year: i32, day_of_week: DayOfWeek) -> PeriodKey {
    PeriodKey::new(season, calendar_year, day_of_week)
}

/// 30 local routes; route n has weekday spring 2015 ridership 1000 + 10n
pub fn ranked_routes_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for number in 1..=30 {
        let route_id = add_route(&mut store, number, "LOCAL");
        add_fact(
            &mut store,
            RidershipKind::Daily,
            route_id,
            period(Season::Spring, 2015, DayOfWeek::Weekday),
            1000.0 + 10.0 * number as f64,
        );
    }
    store
}

/// 3 routes with daily and service-hour facts for every day type in
/// summer, spring and winter 2010
///
/// Route n rides `1000 / n + 10n` (integer division) a day at
/// `10n - (n + 3)` riders per service hour.
pub fn weekly_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for number in 1..=3_i64 {
        let route_id = add_route(&mut store, number, "LOCAL");
        let daily = (1000 / number + 10 * number) as f64;
        let productivity = (10 * number - (number + 3)) as f64;
        for day in [DayOfWeek::Weekday, DayOfWeek::Sunday, DayOfWeek::Saturday] {
            for season in [Season::Summer, Season::Spring, Season::Winter] {
                let key = period(season, 2010, day);
                add_fact(&mut store, RidershipKind::Daily, route_id, key, daily);
                add_fact(&mut store, RidershipKind::ServiceHour, route_id, key, productivity);
            }
        }
    }
    store
}

pub fn route_numbers(routes: &[i64]) -> std::collections::BTreeSet<i64> {
    routes.iter().copied().collect()
}
