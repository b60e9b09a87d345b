//! Read-only views of the derived data for report rendering
//!
//! These build plain serializable records; rendering them into documents is
//! left to the consumer.

use crate::Result;
use crate::app::models::{DayOfWeek, RidershipFact, RidershipKind};
use crate::app::services::period_locator::PeriodCalibrator;
use crate::app::services::store::RidershipStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One point of a route sparkline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparkPoint {
    pub date: DateTime<Utc>,
    pub ridership: i64,
}

/// Weekly-equivalent ridership series for one route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparklineCompendium {
    pub route_number: i64,
    pub route_name: String,
    pub selector: String,
    pub data: Vec<SparkPoint>,
}

/// Current daily facts of one high-ridership route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRouteCompendium {
    pub route_number: i64,
    pub route_name: String,
    pub selector: String,
    pub riderships: Vec<RidershipFact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePerformance {
    pub route_number: i64,
    pub ridership: f64,
    pub productivity: Option<f64>,
}

/// Weekly performance of every route for one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductivityPeriod {
    pub date: DateTime<Utc>,
    pub performance: Vec<RoutePerformance>,
}

/// Weekly ridership contribution of one daily value, truncated to whole riders
fn weekly_ridership(day_of_week: DayOfWeek, value: f64) -> i64 {
    (day_of_week.weekly_weight() * value).trunc() as i64
}

/// Sparkline series for every route with current daily facts
///
/// Facts are re-keyed onto the weekday timestamp of their season and year and
/// summed with the weekly weighting. Points are in date order; routes are
/// ordered by their latest point, busiest first.
pub fn route_sparklines<S: RidershipStore + ?Sized>(
    store: &S,
    calibrator: &PeriodCalibrator,
) -> Result<Vec<SparklineCompendium>> {
    let facts = store.current_facts(RidershipKind::Daily);
    let mut compendiums = Vec::new();

    for route in store.routes() {
        let mut points: BTreeMap<DateTime<Utc>, i64> = BTreeMap::new();
        for fact in facts.iter().filter(|fact| fact.route_id == route.id) {
            let date = calibrator.canonical_timestamp(
                DayOfWeek::Weekday,
                fact.season,
                fact.calendar_year,
            )?;
            *points.entry(date).or_insert(0) += weekly_ridership(fact.day_of_week, fact.ridership);
        }

        if points.is_empty() {
            continue;
        }

        compendiums.push(SparklineCompendium {
            route_number: route.route_number,
            route_name: route.route_name,
            selector: format!("ridership-sparkline-{}", route.route_number),
            data: points
                .into_iter()
                .map(|(date, ridership)| SparkPoint { date, ridership })
                .collect(),
        });
    }

    compendiums.sort_by_key(|compendium| {
        std::cmp::Reverse(compendium.data.last().map_or(0, |point| point.ridership))
    });
    Ok(compendiums)
}

/// Current daily facts of each high-ridership route, oldest first
pub fn top_route_compendiums<S: RidershipStore + ?Sized>(store: &S) -> Vec<TopRouteCompendium> {
    let facts = store.current_facts(RidershipKind::Daily);

    store
        .routes()
        .into_iter()
        .filter(|route| route.is_high_ridership)
        .map(|route| {
            let mut riderships: Vec<RidershipFact> = facts
                .iter()
                .filter(|fact| fact.route_id == route.id)
                .cloned()
                .collect();
            riderships.sort_by_key(|fact| fact.measurement_timestamp);

            TopRouteCompendium {
                route_number: route.route_number,
                selector: format!("top-route-viz-{}", route.route_number),
                route_name: route.route_name,
                riderships,
            }
        })
        .collect()
}

/// Weekly performance grouped by season timestamp, newest season first
///
/// Within a season, routes are ordered by productivity, lowest first; routes
/// without productivity come first.
pub fn productivity_series<S: RidershipStore + ?Sized>(store: &S) -> Vec<ProductivityPeriod> {
    let mut by_date: BTreeMap<DateTime<Utc>, Vec<RoutePerformance>> = BTreeMap::new();

    for weekly in store.weekly_performances() {
        let Some(route) = store.route(weekly.route_id) else {
            continue;
        };
        by_date
            .entry(weekly.measurement_timestamp)
            .or_default()
            .push(RoutePerformance {
                route_number: route.route_number,
                ridership: weekly.ridership,
                productivity: weekly.productivity,
            });
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, mut performance)| {
            performance.sort_by(|a, b| compare_productivity(a.productivity, b.productivity));
            ProductivityPeriod { date, performance }
        })
        .collect()
}

fn compare_productivity(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
