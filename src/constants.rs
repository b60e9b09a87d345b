//! Application constants for the ridership ETL
//!
//! This module contains the configuration defaults, header labels and
//! calendar mappings used throughout the ETL.

// =============================================================================
// Worksheet Names and Header Labels
// =============================================================================

/// Worksheets expected in a complete ridership export
pub const REQUIRED_WORKSHEETS: &[&str] = &[
    "Ridership by Route Weekday",
    "Ridership by Route Saturday",
    "Ridership by Route Sunday",
    "Riders per Hour Weekday",
    "Riders Hour Saturday",
    "Riders per Hour Sunday",
];

/// Default daily ridership worksheets (route directory + daily facts)
pub const DEFAULT_DAILY_RIDERSHIP_WORKSHEETS: &[&str] = &[
    "Ridership by Route Weekday",
    "Ridership by Route Saturday",
    "Ridership by Route Sunday",
];

/// Default service-hour productivity worksheets
pub const DEFAULT_HOUR_PRODUCTIVITY_WORKSHEETS: &[&str] = &[
    "Riders per Hour Weekday",
    "Riders Hour Saturday",
    "Riders per Hour Sunday",
];

/// Header labels that mark the route listing in the first columns
pub mod headers {
    /// Column 0 header; its row is the route header row
    pub const ROUTE_NUMBER: &str = "Route";

    /// Column 1 header enabling route name capture
    pub const ROUTE_NAME: &str = "Route Name";

    /// Column 2 header enabling service type capture
    pub const ROUTE_TYPE: &str = "Route Type";

    /// Column holding route numbers
    pub const ROUTE_NUMBER_COLUMN: usize = 0;

    /// Column holding route names
    pub const ROUTE_NAME_COLUMN: usize = 1;

    /// Column holding service types
    pub const ROUTE_TYPE_COLUMN: usize = 2;
}

// =============================================================================
// Period Detection and Calibration
// =============================================================================

/// Rows searched per column, and consecutive non-period columns tolerated
pub const DEFAULT_PERIOD_SEARCH_FLOOR: usize = 10;

/// Timezone the agency reports in
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Representative month for each season
pub mod season_months {
    pub const WINTER: u32 = 1;
    pub const SPRING: u32 = 4;
    pub const SUMMER: u32 = 7;
    pub const FALL: u32 = 10;
}

/// ISO weekday (Monday = 1) each day-of-week label calibrates to
pub mod iso_weekdays {
    pub const WEEKDAY: u32 = 1;
    pub const SATURDAY: u32 = 6;
    pub const SUNDAY: u32 = 7;
}

// =============================================================================
// Aggregation
// =============================================================================

/// Multiplier applied to the single weekday value when estimating a week
pub const WEEKDAY_MULTIPLIER: f64 = 5.0;

/// Number of routes flagged as high ridership
pub const DEFAULT_HIGH_RIDERSHIP_COUNT: usize = 10;

// =============================================================================
// ETL Report Labels
// =============================================================================

pub mod etl_types {
    pub const ROUTE_INFO: &str = "route-info";
    pub const DAILY_RIDERSHIP: &str = "daily-ridership";
    pub const SERVICE_HOUR_RIDERSHIP: &str = "service-hour-ridership";
}

// =============================================================================
// Configuration Files
// =============================================================================

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "ridership-etl";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default store snapshot file name
pub const DEFAULT_STORE_FILE: &str = "ridership-store.json";
