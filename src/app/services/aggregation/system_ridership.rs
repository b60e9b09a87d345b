//! System-wide ridership totals

use crate::Result;
use crate::app::models::{RidershipFact, RidershipKind, SystemRidership};
use crate::app::services::store::RidershipStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Flag every active system ridership row inactive
pub fn deactivate_previous_system_ridership<S: RidershipStore + ?Sized>(store: &mut S) -> usize {
    let deactivated = store.deactivate_system_ridership();
    debug!("Deactivated {} system ridership rows", deactivated);
    deactivated
}

/// Rebuild system ridership from the current daily facts
///
/// Current facts sharing a measurement timestamp and route service type are
/// summed into one new active row. Previously active rows are kept but
/// deactivated. Returns the number of rows created.
pub fn update_system_ridership<S: RidershipStore + ?Sized>(store: &mut S) -> Result<usize> {
    deactivate_previous_system_ridership(store);

    let mut totals: BTreeMap<(DateTime<Utc>, String), (RidershipFact, f64)> = BTreeMap::new();
    for fact in store.current_facts(RidershipKind::Daily) {
        let Some(route) = store.route(fact.route_id) else {
            debug!("Daily fact {} has no route, skipping", fact.id);
            continue;
        };

        let key = (fact.measurement_timestamp, route.service_type);
        match totals.get_mut(&key) {
            Some((_, total)) => *total += fact.ridership,
            None => {
                let ridership = fact.ridership;
                totals.insert(key, (fact, ridership));
            }
        }
    }

    let created_on = Utc::now();
    let mut created = 0;
    for ((measurement_timestamp, service_type), (fact, ridership)) in totals {
        store.insert_system_ridership(SystemRidership {
            id: 0,
            season: fact.season,
            calendar_year: fact.calendar_year,
            day_of_week: fact.day_of_week,
            service_type,
            ridership,
            measurement_timestamp,
            is_active: true,
            created_on,
        })?;
        created += 1;
    }

    store.commit()?;
    info!("Recomputed system ridership: {} active rows", created);
    Ok(created)
}
