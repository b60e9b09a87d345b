//! Longitudinal system trends

use crate::Result;
use crate::app::models::{DayOfWeek, SystemRidership, TrendPoint, encode_trend};
use crate::app::services::period_locator::PeriodCalibrator;
use crate::app::services::store::RidershipStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Weekly-weighted trend points per upper-cased service type
///
/// Every row is re-keyed onto the weekday timestamp of its season and year,
/// so the weekday, Saturday and Sunday totals of a season land on one point.
/// The weekday total counts five times, Saturday and Sunday once.
pub fn build_trend_points(
    rows: &[SystemRidership],
    calibrator: &PeriodCalibrator,
) -> Result<BTreeMap<String, Vec<TrendPoint>>> {
    let mut buckets: BTreeMap<String, BTreeMap<DateTime<Utc>, f64>> = BTreeMap::new();

    for row in rows {
        let timestamp =
            calibrator.canonical_timestamp(DayOfWeek::Weekday, row.season, row.calendar_year)?;
        *buckets
            .entry(row.service_type.to_uppercase())
            .or_default()
            .entry(timestamp)
            .or_insert(0.0) += row.ridership * row.day_of_week.weekly_weight();
    }

    Ok(buckets
        .into_iter()
        .map(|(service_type, points)| {
            let points = points
                .into_iter()
                .map(|(timestamp, ridership)| TrendPoint {
                    timestamp,
                    ridership,
                })
                .collect();
            (service_type, points)
        })
        .collect())
}

/// Replace the trend set with one trend per service type found in active
/// system ridership
///
/// Trends of service types no longer present are deleted. Returns the number
/// of trends written.
pub fn update_system_trends<S: RidershipStore + ?Sized>(
    store: &mut S,
    calibrator: &PeriodCalibrator,
) -> Result<usize> {
    let trends = build_trend_points(&store.active_system_ridership(), calibrator)?;
    let updated_on = Utc::now();

    for (service_type, points) in &trends {
        store.upsert_system_trend(service_type, encode_trend(points)?, updated_on)?;
    }

    let service_types: Vec<String> = trends.keys().cloned().collect();
    let removed = store.retain_system_trends(&service_types);
    if removed > 0 {
        debug!("Removed {} stale system trends", removed);
    }

    store.commit()?;
    info!("Updated {} system trends", trends.len());
    Ok(trends.len())
}
