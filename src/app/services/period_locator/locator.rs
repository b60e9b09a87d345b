//! Column scanning for ridership period headers

use super::calibration::PeriodCalibrator;
use crate::app::models::{DayOfWeek, PeriodDescriptor, Season};
use crate::app::services::grid::Grid;
use crate::constants::DEFAULT_PERIOD_SEARCH_FLOOR;
use crate::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Located periods keyed by absolute worksheet column
pub type PeriodMap = BTreeMap<usize, PeriodDescriptor>;

/// Scans worksheet columns for period headers
#[derive(Debug, Clone)]
pub struct PeriodLocator {
    calibrator: PeriodCalibrator,
    search_floor: usize,
}

impl PeriodLocator {
    /// Create a locator using the default search floor
    pub fn new(calibrator: PeriodCalibrator) -> Self {
        Self {
            calibrator,
            search_floor: DEFAULT_PERIOD_SEARCH_FLOOR,
        }
    }

    /// Rows searched per column, and consecutive non-period columns before giving up
    pub fn with_search_floor(mut self, search_floor: usize) -> Self {
        self.search_floor = search_floor;
        self
    }

    pub fn search_floor(&self) -> usize {
        self.search_floor
    }

    pub fn calibrator(&self) -> &PeriodCalibrator {
        &self.calibrator
    }

    /// Build the column -> period map for a worksheet
    ///
    /// Columns are scanned left to right from column 0. Scanning stops after
    /// `search_floor` consecutive columns without a period, so a single
    /// stray column between two period columns does not end the scan.
    pub fn locate_periods<G: Grid + ?Sized>(&self, grid: &G) -> Result<PeriodMap> {
        let mut periods = PeriodMap::new();
        let mut consecutive_misses = 0;
        let mut column = 0;

        while consecutive_misses < self.search_floor {
            match self.find_period(grid, column)? {
                Some(period) => {
                    debug!(
                        "Worksheet '{}' column {}: {} {} {}",
                        grid.name(),
                        column,
                        period.season,
                        period.year,
                        period.day_of_week
                    );
                    periods.insert(column, period);
                    consecutive_misses = 0;
                }
                None => consecutive_misses += 1,
            }
            column += 1;
        }

        if periods.is_empty() {
            warn!("No ridership periods found in worksheet '{}'", grid.name());
        } else {
            info!(
                "Located {} ridership periods in worksheet '{}'",
                periods.len(),
                grid.name()
            );
        }

        Ok(periods)
    }

    /// Search the first `search_floor` rows of one column for a period header
    ///
    /// Running off the sheet edge ends the search for this column and counts
    /// as no match.
    pub fn find_period<G: Grid + ?Sized>(
        &self,
        grid: &G,
        column: usize,
    ) -> Result<Option<PeriodDescriptor>> {
        for row in 0..self.search_floor {
            let Some(cell) = grid.cell(row, column) else {
                return Ok(None);
            };

            let Some((season, year)) = cell.as_text().and_then(parse_season_and_year) else {
                continue;
            };

            let Some(day_of_week) = extract_day_of_week(grid, row, column) else {
                continue;
            };

            let timestamp = self
                .calibrator
                .canonical_timestamp(day_of_week, season, year)?;

            return Ok(Some(PeriodDescriptor {
                column,
                season,
                year,
                day_of_week,
                timestamp,
            }));
        }

        Ok(None)
    }
}

/// Day of week in the cell directly under a period header
pub fn extract_day_of_week<G: Grid + ?Sized>(
    grid: &G,
    period_row: usize,
    period_column: usize,
) -> Option<DayOfWeek> {
    grid.text(period_row + 1, period_column)
        .and_then(parse_day_of_week)
}

/// Parse a `<season> <year>` header such as "Spring 2015" (case-insensitive)
pub fn parse_season_and_year(text: &str) -> Option<(Season, i32)> {
    let lowered = text.to_lowercase();
    let captures = season_pattern().captures(&lowered)?;
    let season = captures.get(1)?.as_str().parse::<Season>().ok()?;
    let year = captures.get(2)?.as_str().parse::<i32>().ok()?;
    Some((season, year))
}

/// Parse a day-of-week label; matches on the label prefix ("Weekday Avg" is a weekday)
pub fn parse_day_of_week(text: &str) -> Option<DayOfWeek> {
    let lowered = text.to_lowercase();
    let captures = day_pattern().captures(&lowered)?;
    captures.get(1)?.as_str().parse::<DayOfWeek>().ok()
}

fn season_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(summer|fall|winter|spring) +(\d{4})").expect("season pattern is valid")
    })
}

fn day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(weekday|saturday|sunday)").expect("day pattern is valid")
    })
}
