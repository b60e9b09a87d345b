//! Tests for the current/superseded versioning protocol

use super::*;
use crate::Error;
use crate::app::models::{NewRidershipFact, RidershipKind};
use crate::app::services::ridership_versioner::{deactivate_current_period, version_fact};
use chrono::Utc;

#[test]
fn test_first_version_supersedes_nothing() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();

    let versioned = version_fact(
        &mut store,
        RidershipKind::Daily,
        route.id,
        &spring_2015_weekday(),
        12000.0,
    )
    .unwrap();

    assert_eq!(versioned.superseded, None);
    assert!(versioned.fact.is_current);
    assert_eq!(versioned.fact.ridership, 12000.0);
    assert_eq!(
        versioned.fact.measurement_timestamp,
        spring_2015_weekday().timestamp
    );
}

#[test]
fn test_n_versions_leave_one_current_fact() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();
    let period = spring_2015_weekday();
    let values = [100.0, 200.0, 300.0, 400.0, 500.0];

    for value in values {
        version_fact(&mut store, RidershipKind::Daily, route.id, &period, value).unwrap();
    }

    let facts = store.facts(RidershipKind::Daily);
    assert_eq!(facts.len(), values.len());
    let current: Vec<_> = facts.iter().filter(|fact| fact.is_current).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].ridership, 500.0);
    assert_eq!(
        facts.iter().filter(|fact| !fact.is_current).count(),
        values.len() - 1
    );
}

#[test]
fn test_version_reports_superseded_fact() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();
    let period = spring_2015_weekday();

    let first = version_fact(&mut store, RidershipKind::Daily, route.id, &period, 1.0).unwrap();
    let second = version_fact(&mut store, RidershipKind::Daily, route.id, &period, 2.0).unwrap();

    assert_eq!(second.superseded, Some(first.fact.id));
}

#[test]
fn test_versioning_is_per_kind() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();
    let period = spring_2015_weekday();

    version_fact(&mut store, RidershipKind::Daily, route.id, &period, 12000.0).unwrap();
    let hourly =
        version_fact(&mut store, RidershipKind::ServiceHour, route.id, &period, 40.0).unwrap();

    assert_eq!(hourly.superseded, None);
    assert_eq!(store.current_facts(RidershipKind::Daily).len(), 1);
}

#[test]
fn test_deactivate_without_current_fact_is_noop() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();

    let deactivated = deactivate_current_period(
        &mut store,
        RidershipKind::Daily,
        route.id,
        spring_2015_weekday().key(),
    )
    .unwrap();

    assert_eq!(deactivated, None);
}

#[test]
fn test_duplicate_current_facts_abort() {
    let mut store = store_with_routes();
    let route = store.find_route_by_number(1).unwrap();
    let period = spring_2015_weekday();
    let fact = NewRidershipFact {
        kind: RidershipKind::Daily,
        route_id: route.id,
        period: period.key(),
        ridership: 1.0,
        measurement_timestamp: period.timestamp,
        created_on: Utc::now(),
    };

    // Force the broken state the protocol is meant to prevent
    let first = store.insert_fact(fact.clone()).unwrap();
    store
        .set_fact_current(RidershipKind::Daily, first.id, false)
        .unwrap();
    let second = store.insert_fact(fact).unwrap();
    store
        .set_fact_current(RidershipKind::Daily, first.id, true)
        .unwrap();
    assert_ne!(first.id, second.id);

    let err = version_fact(&mut store, RidershipKind::Daily, route.id, &period, 3.0).unwrap_err();

    assert!(matches!(err, Error::StoreIntegrity { .. }));
}
