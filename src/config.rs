//! Configuration management and validation.
//!
//! The ETL core consumes a plain [`Config`]: where the store lives, which
//! worksheets to read, the agency timezone and the tuning knobs of the period
//! scan and route ranking. Files are TOML:
//!
//! ```toml
//! [store]
//! path = "ridership-store.json"
//!
//! [worksheets]
//! daily_ridership = ["Ridership by Route Weekday", "Ridership by Route Saturday"]
//! hour_productivity = ["Riders per Hour Weekday"]
//!
//! [etl]
//! timezone = "America/Chicago"
//! period_search_floor = 10
//! high_ridership_count = 10
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every table and key is optional; missing values take their defaults.

use crate::app::services::period_locator::{PeriodCalibrator, PeriodLocator};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DAILY_RIDERSHIP_WORKSHEETS,
    DEFAULT_HIGH_RIDERSHIP_COUNT, DEFAULT_HOUR_PRODUCTIVITY_WORKSHEETS,
    DEFAULT_PERIOD_SEARCH_FLOOR, DEFAULT_STORE_FILE, DEFAULT_TIMEZONE,
};
use crate::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Complete ETL configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub worksheets: WorksheetConfig,
    pub etl: EtlConfig,
    pub logging: LoggingConfig,
}

/// Store connection target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot file backing the store
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

/// Worksheet names to read from a workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetConfig {
    /// Worksheets used for the route directory and daily ridership facts
    pub daily_ridership: Vec<String>,

    /// Worksheets used for service-hour ridership facts only
    pub hour_productivity: Vec<String>,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self {
            daily_ridership: to_strings(DEFAULT_DAILY_RIDERSHIP_WORKSHEETS),
            hour_productivity: to_strings(DEFAULT_HOUR_PRODUCTIVITY_WORKSHEETS),
        }
    }
}

/// Period detection and aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// IANA name of the agency timezone
    pub timezone: String,

    /// Rows searched per column, and consecutive non-period columns before
    /// the scan stops
    pub period_search_floor: usize,

    /// Number of routes flagged as high ridership
    pub high_ridership_count: usize,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            period_search_floor: DEFAULT_PERIOD_SEARCH_FLOOR,
            high_ridership_count: DEFAULT_HIGH_RIDERSHIP_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config = Self::from_toml(&contents).map_err(|e| match e {
            Error::Configuration { message } => {
                Error::configuration(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Serialize configuration to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to encode configuration: {}", e)))
    }

    /// Default config file location (`<config dir>/ridership-etl/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Check that the configuration can drive an ETL run
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(Error::configuration("store.path must not be empty"));
        }

        if self.worksheets.daily_ridership.is_empty() {
            return Err(Error::configuration(
                "worksheets.daily_ridership must name at least one worksheet",
            ));
        }

        let mut all_names = self
            .worksheets
            .daily_ridership
            .iter()
            .chain(&self.worksheets.hour_productivity);
        if let Some(blank) = all_names.find(|name| name.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "Worksheet names must not be blank (got '{}')",
                blank
            )));
        }

        if self.etl.period_search_floor == 0 {
            return Err(Error::configuration(
                "etl.period_search_floor must be greater than 0",
            ));
        }

        if self.etl.high_ridership_count == 0 {
            return Err(Error::configuration(
                "etl.high_ridership_count must be greater than 0",
            ));
        }

        self.parsed_timezone()?;
        Ok(())
    }

    /// The configured agency timezone
    pub fn parsed_timezone(&self) -> Result<Tz> {
        self.etl.timezone.parse::<Tz>().map_err(|_| {
            Error::configuration(format!("Unknown timezone '{}'", self.etl.timezone))
        })
    }

    /// Period locator for the configured timezone and search floor
    pub fn period_locator(&self) -> Result<PeriodLocator> {
        let calibrator = PeriodCalibrator::new(self.parsed_timezone()?);
        Ok(PeriodLocator::new(calibrator).with_search_floor(self.etl.period_search_floor))
    }

    /// Set the store snapshot path
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.path = path.into();
        self
    }

    /// Set the daily ridership worksheet names
    pub fn with_daily_ridership_worksheets(mut self, names: Vec<String>) -> Self {
        self.worksheets.daily_ridership = names;
        self
    }

    /// Set the service-hour ridership worksheet names
    pub fn with_hour_productivity_worksheets(mut self, names: Vec<String>) -> Self {
        self.worksheets.hour_productivity = names;
        self
    }

    /// Set the agency timezone
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.etl.timezone = timezone.into();
        self
    }

    /// Set the period search floor
    pub fn with_period_search_floor(mut self, floor: usize) -> Self {
        self.etl.period_search_floor = floor;
        self
    }

    /// Set how many routes are flagged as high ridership
    pub fn with_high_ridership_count(mut self, count: usize) -> Self {
        self.etl.high_ridership_count = count;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}
