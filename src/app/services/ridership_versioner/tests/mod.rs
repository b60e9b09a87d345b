//! Shared test utilities and fixtures for ridership versioning tests

use crate::app::models::{DayOfWeek, PeriodDescriptor, Season};
use crate::app::services::grid::Worksheet;
use crate::app::services::grid::tests::sheet_from_rows;
use crate::app::services::period_locator::{PeriodCalibrator, PeriodLocator};
use crate::app::services::store::{InMemoryStore, RidershipStore};

pub mod versioning_tests;

pub const WEEKDAY_SHEET: &str = "Ridership by Route Weekday";
pub const HOURS_SHEET: &str = "Riders per Hour Weekday";

pub fn locator() -> PeriodLocator {
    PeriodLocator::new(PeriodCalibrator::new(chrono_tz::America::Chicago))
}

pub fn spring_2015_weekday() -> PeriodDescriptor {
    PeriodDescriptor {
        column: 3,
        season: Season::Spring,
        year: 2015,
        day_of_week: DayOfWeek::Weekday,
        timestamp: locator()
            .calibrator()
            .canonical_timestamp(DayOfWeek::Weekday, Season::Spring, 2015)
            .unwrap(),
    }
}

/// Store with routes 1, 20 and 801
pub fn store_with_routes() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert_route(1, "1-NORTH LAMAR", "LOCAL").unwrap();
    store.insert_route(20, "20-MANOR RD", "LOCAL").unwrap();
    store.insert_route(801, "801-METRORAPID", "METRORAPID").unwrap();
    store
}

/// Two weekday periods; route 99 is not in the directory, route 20 has a gap
pub fn ridership_sheet(name: &str) -> Worksheet {
    sheet_from_rows(
        name,
        &[
            &["Average Weekday Ridership", "", "", "", ""],
            &["", "", "", "Spring 2015", "Fall 2015"],
            &["", "", "", "Weekday", "Weekday"],
            &["Route", "Route Name", "Route Type", "", ""],
            &["1", "1-North Lamar", "Local", "12000", "12500"],
            &["20", "20-Manor Rd", "Local", "3000", "n/a"],
            &["99", "99-Unknown", "Local", "10", "11"],
            &["801", "801-MetroRapid", "MetroRapid", "5,500", "6000"],
            &["Total", "", "", "20510", "18511"],
        ],
    )
}
