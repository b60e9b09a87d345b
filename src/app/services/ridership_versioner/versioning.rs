//! Current/superseded versioning of ridership facts

use crate::Result;
use crate::app::models::{
    NewRidershipFact, PeriodDescriptor, PeriodKey, RidershipFact, RidershipKind,
};
use crate::app::services::store::RidershipStore;
use chrono::Utc;
use tracing::debug;

/// Result of versioning one extracted value
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedFact {
    /// Id of the fact that stopped being current, if there was one
    pub superseded: Option<u64>,

    /// The newly inserted current fact
    pub fact: RidershipFact,
}

/// Flag the current fact for a key non-current
///
/// Returns the id of the deactivated fact, or `None` when nothing was current.
pub fn deactivate_current_period<S: RidershipStore + ?Sized>(
    store: &mut S,
    kind: RidershipKind,
    route_id: u64,
    period: PeriodKey,
) -> Result<Option<u64>> {
    let Some(current) = store.find_current_fact(kind, route_id, period)? else {
        return Ok(None);
    };

    store.set_fact_current(kind, current.id, false)?;
    debug!(
        "Superseded {} fact {} for route_id {} in {}",
        kind, current.id, route_id, period
    );
    Ok(Some(current.id))
}

/// Record `ridership` as the current value for a route in a period
pub fn version_fact<S: RidershipStore + ?Sized>(
    store: &mut S,
    kind: RidershipKind,
    route_id: u64,
    period: &PeriodDescriptor,
    ridership: f64,
) -> Result<VersionedFact> {
    let key = period.key();
    let superseded = deactivate_current_period(store, kind, route_id, key)?;

    let fact = store.insert_fact(NewRidershipFact {
        kind,
        route_id,
        period: key,
        ridership,
        measurement_timestamp: period.timestamp,
        created_on: Utc::now(),
    })?;

    Ok(VersionedFact { superseded, fact })
}
