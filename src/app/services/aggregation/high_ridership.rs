//! High-ridership route ranking

use crate::Result;
use crate::app::models::{DayOfWeek, RidershipKind};
use crate::app::services::store::RidershipStore;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Most recent measurement timestamp among current weekday daily facts
pub fn get_latest_measurement_timestamp<S: RidershipStore + ?Sized>(
    store: &S,
) -> Option<DateTime<Utc>> {
    store
        .current_facts(RidershipKind::Daily)
        .into_iter()
        .filter(|fact| fact.day_of_week == DayOfWeek::Weekday)
        .map(|fact| fact.measurement_timestamp)
        .max()
}

/// Route numbers of the `count` routes with the highest weekday ridership
/// measured at `latest`
///
/// Ties are broken by route number, lowest first.
pub fn get_high_ridership_routes<S: RidershipStore + ?Sized>(
    store: &S,
    latest: DateTime<Utc>,
    count: usize,
) -> Vec<i64> {
    let mut ranked: Vec<(i64, f64)> = store
        .current_facts(RidershipKind::Daily)
        .into_iter()
        .filter(|fact| {
            fact.day_of_week == DayOfWeek::Weekday && fact.measurement_timestamp == latest
        })
        .filter_map(|fact| {
            store
                .route(fact.route_id)
                .map(|route| (route.route_number, fact.ridership))
        })
        .collect();

    ranked.sort_by(|(a_number, a_ridership), (b_number, b_ridership)| {
        b_ridership
            .total_cmp(a_ridership)
            .then_with(|| a_number.cmp(b_number))
    });

    ranked
        .into_iter()
        .take(count)
        .map(|(route_number, _)| route_number)
        .collect()
}

/// Reset the high-ridership flags to the current top `count` routes
///
/// Returns the flagged route numbers in rank order.
pub fn update_high_ridership_routes<S: RidershipStore + ?Sized>(
    store: &mut S,
    count: usize,
) -> Result<Vec<i64>> {
    store.clear_high_ridership();

    let Some(latest) = get_latest_measurement_timestamp(&*store) else {
        warn!("No current weekday ridership, no high-ridership routes flagged");
        store.commit()?;
        return Ok(Vec::new());
    };

    let top_routes = get_high_ridership_routes(&*store, latest, count);
    for &route_number in &top_routes {
        if let Some(route) = store.find_route_by_number(route_number) {
            store.set_high_ridership(route.id)?;
        }
    }

    store.commit()?;
    info!(
        "Flagged {} high-ridership routes as of {}",
        top_routes.len(),
        latest.to_rfc3339()
    );
    Ok(top_routes)
}
