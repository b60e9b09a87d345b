//! Calibration of (day of week, season, year) to one canonical timestamp
//!
//! A season is represented by the first day of its representative month at
//! local midnight in the agency timezone (winter → January, spring → April,
//! summer → July, fall → October). The date is then moved to the requested
//! day of week *within the same ISO week*, so the result can fall in the
//! previous month or even the previous year: weekday ridership for winter
//! 2016 is stamped Monday 2015-12-28 because 2016-01-01 is a Friday.

use crate::app::models::{DayOfWeek, Season};
use crate::constants::DEFAULT_TIMEZONE;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use chrono_tz::Tz;

/// Converts period labels into canonical UTC timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalibrator {
    timezone: Tz,
}

impl PeriodCalibrator {
    /// Create a calibrator for the given agency timezone
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Canonical timestamp for a period, normalized to UTC
    ///
    /// Pure and deterministic: identical inputs always give the same instant.
    pub fn canonical_timestamp(
        &self,
        day_of_week: DayOfWeek,
        season: Season,
        year: i32,
    ) -> Result<DateTime<Utc>> {
        let month = season.representative_month();
        let local_midnight = self
            .timezone
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .earliest()
            .ok_or_else(|| {
                Error::calibration(format!(
                    "No local midnight on {}-{:02}-01 in {}",
                    year,
                    month,
                    self.timezone.name()
                ))
            })?;

        calibrate_day_of_week(&local_midnight, day_of_week)
    }
}

impl Default for PeriodCalibrator {
    fn default() -> Self {
        let timezone = DEFAULT_TIMEZONE
            .parse::<Tz>()
            .unwrap_or(chrono_tz::America::Chicago);
        Self::new(timezone)
    }
}

/// Move a timestamp to the requested day of week within its own ISO week
///
/// `weekday` calibrates to Monday, `saturday` to Saturday and `sunday` to
/// Sunday. A Monday timestamp asked for `sunday` therefore moves forward six
/// days, not back one. The result is returned in UTC.
pub fn calibrate_day_of_week<Z: TimeZone>(
    timestamp: &DateTime<Z>,
    day_of_week: DayOfWeek,
) -> Result<DateTime<Utc>> {
    let target_day = i64::from(day_of_week.iso_weekday());
    let current_day = i64::from(timestamp.weekday().number_from_monday());
    let utc = timestamp.with_timezone(&Utc);

    if current_day == target_day {
        return Ok(utc);
    }

    utc.checked_add_signed(Duration::days(target_day - current_day))
        .ok_or_else(|| Error::calibration(format!("Timestamp {} out of range", utc)))
}
