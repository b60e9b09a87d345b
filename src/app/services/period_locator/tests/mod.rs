//! Shared test utilities and fixtures for period locator tests

use crate::app::services::grid::Worksheet;
use crate::app::services::grid::tests::sheet_from_rows;
use crate::app::services::period_locator::{PeriodCalibrator, PeriodLocator};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::America::Chicago;


pub fn chicago_calibrator() -> PeriodCalibrator {
    PeriodCalibrator::new(Chicago)
}

pub fn chicago_locator() -> PeriodLocator {
    PeriodLocator::new(chicago_calibrator())
}

/// (year, month, day, iso weekday) of a timestamp seen in the agency timezone
pub fn local_date(timestamp: DateTime<Utc>) -> (i32, u32, u32, u32) {
    let local = timestamp.with_timezone(&Chicago);
    (
        local.year(),
        local.month(),
        local.day(),
        local.weekday().number_from_monday(),
    )
}

/// Worksheet laid out like an agency export: title, blank, period headers,
/// day-of-week row, route header, route rows
pub fn ridership_sheet() -> Worksheet {
    sheet_from_rows(
        "Ridership by Route Weekday",
        &[
            &["Average Daily Ridership", "", "", "", "", "", "", "", "", "", "", ""],
            &["", "", "", "", "", "", "", "", "", "", "", ""],
            &["", "", "", "Spring 2012", "Summer 2012", "Fall 2012", "", "Winter 2013", "Fall 2013", "", "Summer 2014", ""],
            &["", "", "", "Weekday", "Weekday", "Weekday", "", "Weekday", "Weekday", "", "Weekday", ""],
            &["Route", "Route Name", "Route Type", "", "", "", "", "", "", "", "", ""],
            &["1", "1-North Lamar/South Congress", "Local", "13000", "12000", "12500", "", "11000", "11500", "", "10997.5717761557", ""],
            &["2", "2-Rosewood", "Local", "900", "850", "", "", "800", "700", "", "650", ""],
        ],
    )
}
