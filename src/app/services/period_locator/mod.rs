//! Period detection and calibration for ridership worksheets
//!
//! Ridership worksheets carry one column per measurement period. A period
//! column has a `<season> <year>` header cell with a day-of-week cell
//! directly beneath it, somewhere in the first rows of the sheet:
//!
//! ```text
//!            | Spring 2015 | Spring 2015 | Spring 2015 |
//!            | Weekday     | Saturday    | Sunday      |
//! Route ...  |             |             |             |
//! ```
//!
//! - [`calibration`] - Canonical representative timestamp for a period
//! - [`locator`] - Column scanning that builds the column -> period map

pub mod calibration;
pub mod locator;

#[cfg(test)]
pub mod tests;

pub use calibration::{PeriodCalibrator, calibrate_day_of_week};
pub use locator::{
    PeriodLocator, PeriodMap, extract_day_of_week, parse_day_of_week, parse_season_and_year,
};
