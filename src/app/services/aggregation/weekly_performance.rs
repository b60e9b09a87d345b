//! Weekly ridership and productivity per route and season

use crate::Result;
use crate::app::models::{DayOfWeek, RidershipKind, Season, UpsertOutcome, WeeklyPerformance};
use crate::app::services::period_locator::PeriodCalibrator;
use crate::app::services::store::RidershipStore;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::info;

type WeeklyKey = (u64, Season, i32);

#[derive(Debug, Default)]
struct Productivity {
    total: f64,
    count: usize,
}

impl Productivity {
    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}

/// Upsert one weekly performance row per (route, season, year) with daily facts
///
/// Weekly ridership is 5 x weekday + Saturday + Sunday of the current daily
/// facts. Productivity is the mean of the current service-hour facts for the
/// same key, or `None` when there are none. Returns (created, updated).
pub fn update_weekly_performance<S: RidershipStore + ?Sized>(
    store: &mut S,
    calibrator: &PeriodCalibrator,
) -> Result<(usize, usize)> {
    let mut ridership: BTreeMap<WeeklyKey, f64> = BTreeMap::new();
    for fact in store.current_facts(RidershipKind::Daily) {
        *ridership
            .entry((fact.route_id, fact.season, fact.calendar_year))
            .or_insert(0.0) += fact.ridership * fact.day_of_week.weekly_weight();
    }

    let mut productivity: BTreeMap<WeeklyKey, Productivity> = BTreeMap::new();
    for fact in store.current_facts(RidershipKind::ServiceHour) {
        let entry = productivity
            .entry((fact.route_id, fact.season, fact.calendar_year))
            .or_default();
        entry.total += fact.ridership;
        entry.count += 1;
    }

    let created_on = Utc::now();
    let (mut created, mut updated) = (0, 0);
    for ((route_id, season, calendar_year), weekly_ridership) in ridership {
        let record = WeeklyPerformance {
            id: 0,
            route_id,
            season,
            calendar_year,
            measurement_timestamp: calibrator.canonical_timestamp(
                DayOfWeek::Weekday,
                season,
                calendar_year,
            )?,
            ridership: weekly_ridership,
            productivity: productivity
                .get(&(route_id, season, calendar_year))
                .and_then(Productivity::mean),
            is_current: true,
            created_on,
        };

        match store.upsert_weekly_performance(record)? {
            UpsertOutcome::Created => created += 1,
            UpsertOutcome::Updated => updated += 1,
        }
    }

    store.commit()?;
    info!("Weekly performance: {} created, {} updated", created, updated);
    Ok((created, updated))
}
