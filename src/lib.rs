//! Ridership ETL Library
//!
//! A Rust library for turning periodically-updated transit ridership
//! spreadsheets into consistent longitudinal data for a reporting dashboard.
//!
//! This library provides tools for:
//! - Locating "season year / day-of-week" period headers in weakly-structured worksheets
//! - Calibrating each period to one canonical timestamp in the agency timezone
//! - Building a merged route directory from several worksheets
//! - Extracting per-route ridership facts with current/superseded versioning
//! - Recomputing system ridership, trends, weekly performance and route rankings

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregation;
        pub mod grid;
        pub mod period_locator;
        pub mod pipeline;
        pub mod quality;
        pub mod ridership_versioner;
        pub mod route_directory;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DayOfWeek, EtlReport, EtlType, PeriodDescriptor, RidershipFact, RidershipKind, Route,
    RouteInfo, Season,
};
pub use app::services::grid::{Cell, Grid, Workbook, Worksheet};
pub use app::services::store::{InMemoryStore, RidershipStore};
pub use config::Config;

/// Result type alias for the ridership ETL
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ridership ETL operations
///
/// Expected misses while reading a worksheet (a cell of the wrong type, a
/// route that is not in the directory, an index past the sheet edge) are not
/// errors; they surface as `Option`s inside the services. Everything here
/// aborts the current run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Worksheet missing from the workbook
    #[error("Worksheet not found: '{name}'")]
    WorksheetNotFound { name: String },

    /// Period timestamp could not be built
    #[error("Calibration error: {message}")]
    Calibration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Store integrity violation (duplicate current fact, missing foreign key, ...)
    #[error("Store integrity violation: {message}")]
    StoreIntegrity { message: String },

    /// Route required by a store operation does not exist
    #[error("Route not found: route_id = {route_id}")]
    RouteNotFound { route_id: u64 },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a worksheet not found error
    pub fn worksheet_not_found(name: impl Into<String>) -> Self {
        Self::WorksheetNotFound { name: name.into() }
    }

    /// Create a calibration error
    pub fn calibration(message: impl Into<String>) -> Self {
        Self::Calibration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a store integrity error
    pub fn store_integrity(message: impl Into<String>) -> Self {
        Self::StoreIntegrity {
            message: message.into(),
        }
    }

    /// Create a route not found error
    pub fn route_not_found(route_id: u64) -> Self {
        Self::RouteNotFound { route_id }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error means the store no longer satisfies its invariants
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::StoreIntegrity { .. } | Self::RouteNotFound { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
