//! Data models for ridership ETL
//!
//! This module contains the plain data records exchanged between the ETL
//! services and the store: routes, period descriptors, versioned ridership
//! facts, derived aggregates and ETL audit reports.

use crate::constants::{WEEKDAY_MULTIPLIER, etl_types, iso_weekdays, season_months};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Calendar Vocabulary
// =============================================================================

/// Quarterly season a ridership period belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in calendar order
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Lowercase label used in worksheets and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// First month of the season, used as its representative month
    pub fn representative_month(&self) -> u32 {
        match self {
            Season::Winter => season_months::WINTER,
            Season::Spring => season_months::SPRING,
            Season::Summer => season_months::SUMMER,
            Season::Fall => season_months::FALL,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            other => Err(Error::data_validation(format!("Unknown season '{}'", other))),
        }
    }
}

/// Type of service day a ridership figure describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Weekday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Lowercase label used in worksheets and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Weekday => "weekday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// ISO weekday number (Monday = 1) the day calibrates to
    pub fn iso_weekday(&self) -> u32 {
        match self {
            DayOfWeek::Weekday => iso_weekdays::WEEKDAY,
            DayOfWeek::Saturday => iso_weekdays::SATURDAY,
            DayOfWeek::Sunday => iso_weekdays::SUNDAY,
        }
    }

    /// Weight of one value of this day in a weekly estimate
    ///
    /// The weekday figure stands in for all five weekdays; Saturday and
    /// Sunday count once.
    pub fn weekly_weight(&self) -> f64 {
        match self {
            DayOfWeek::Weekday => WEEKDAY_MULTIPLIER,
            DayOfWeek::Saturday | DayOfWeek::Sunday => 1.0,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekday" => Ok(DayOfWeek::Weekday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            other => Err(Error::data_validation(format!(
                "Unknown day of week '{}'",
                other
            ))),
        }
    }
}

/// Identity of a measurement period: one season of one year, one day type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    pub season: Season,
    pub calendar_year: i32,
    pub day_of_week: DayOfWeek,
}

impl PeriodKey {
    pub fn new(season: Season, calendar_year: i32, day_of_week: DayOfWeek) -> Self {
        Self {
            season,
            calendar_year,
            day_of_week,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.season, self.calendar_year, self.day_of_week)
    }
}

// =============================================================================
// Period Descriptor
// =============================================================================

/// A ridership period located in a worksheet column
///
/// Produced fresh for every worksheet scan and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodDescriptor {
    /// Absolute worksheet column holding the period's values
    pub column: usize,

    /// Season parsed from the header cell
    pub season: Season,

    /// Four-digit calendar year parsed from the header cell
    pub year: i32,

    /// Day type parsed from the cell under the header
    pub day_of_week: DayOfWeek,

    /// Canonical representative timestamp for the period (UTC)
    pub timestamp: DateTime<Utc>,
}

impl PeriodDescriptor {
    /// Storage key of facts measured in this period
    pub fn key(&self) -> PeriodKey {
        PeriodKey::new(self.season, self.year, self.day_of_week)
    }
}

// =============================================================================
// Routes
// =============================================================================

/// A transit route as persisted in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Store-assigned primary key
    pub id: u64,

    /// Public route number (unique)
    pub route_number: i64,

    /// Upper-cased display name
    pub route_name: String,

    /// Upper-cased service type classification (e.g. LOCAL, METRORAIL)
    pub service_type: String,

    /// Whether the route is among the top routes by latest weekday ridership
    pub is_high_ridership: bool,
}

/// Route identity read from a worksheet row, before persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Digit-only route number label
    pub route_number: String,
    pub route_name: String,
    pub service_type: String,
}

impl RouteInfo {
    /// Route info with the route number standing in for the name
    pub fn new(route_number: i64) -> Self {
        Self {
            route_number: route_number.to_string(),
            route_name: route_number.to_string(),
            service_type: String::new(),
        }
    }

    pub fn with_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = route_name.into();
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }
}

/// Whether an upsert created a new row or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

// =============================================================================
// Ridership Facts
// =============================================================================

/// The two structurally identical fact series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RidershipKind {
    /// Estimated riders per day
    Daily,
    /// Estimated riders per service hour (productivity)
    ServiceHour,
}

impl RidershipKind {
    /// ETL report type for imports of this kind
    pub fn etl_type(&self) -> EtlType {
        match self {
            RidershipKind::Daily => EtlType::DailyRidership,
            RidershipKind::ServiceHour => EtlType::ServiceHourRidership,
        }
    }
}

impl fmt::Display for RidershipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etl_type().as_str())
    }
}

/// One measured ridership (or productivity) value for a route and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidershipFact {
    pub id: u64,
    pub kind: RidershipKind,
    pub route_id: u64,
    pub season: Season,
    pub calendar_year: i32,
    pub day_of_week: DayOfWeek,
    pub ridership: f64,

    /// Canonical timestamp of the period the value was measured in
    pub measurement_timestamp: DateTime<Utc>,

    pub created_on: DateTime<Utc>,

    /// Only one fact per (kind, route, period) may be current
    pub is_current: bool,
}

impl RidershipFact {
    pub fn period_key(&self) -> PeriodKey {
        PeriodKey::new(self.season, self.calendar_year, self.day_of_week)
    }
}

/// A fact about to be inserted; the store assigns the id and marks it current
#[derive(Debug, Clone, PartialEq)]
pub struct NewRidershipFact {
    pub kind: RidershipKind,
    pub route_id: u64,
    pub period: PeriodKey,
    pub ridership: f64,
    pub measurement_timestamp: DateTime<Utc>,
    pub created_on: DateTime<Utc>,
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// Weekly ridership and productivity estimate for a route in one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPerformance {
    pub id: u64,
    pub route_id: u64,
    pub season: Season,
    pub calendar_year: i32,

    /// Weekday canonical timestamp of the season
    pub measurement_timestamp: DateTime<Utc>,

    /// 5 × weekday + Saturday + Sunday
    pub ridership: f64,

    /// Mean riders per service hour, when service-hour facts exist
    pub productivity: Option<f64>,

    pub is_current: bool,
    pub created_on: DateTime<Utc>,
}

/// System-wide ridership for one period and service type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRidership {
    pub id: u64,
    pub season: Season,
    pub calendar_year: i32,
    pub day_of_week: DayOfWeek,
    pub service_type: String,
    pub ridership: f64,
    pub measurement_timestamp: DateTime<Utc>,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
}

impl SystemRidership {
    pub fn period_key(&self) -> PeriodKey {
        PeriodKey::new(self.season, self.calendar_year, self.day_of_week)
    }
}

/// Longitudinal weekly ridership trend for one service type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTrend {
    pub id: u64,
    pub service_type: String,

    /// JSON list of `[timestamp, total]` pairs in ascending timestamp order
    pub trend: String,

    pub updated_on: DateTime<Utc>,
}

impl SystemTrend {
    /// Decode the serialized trend into points
    pub fn points(&self) -> Result<Vec<TrendPoint>> {
        let pairs: Vec<(String, f64)> = serde_json::from_str(&self.trend)
            .map_err(|e| Error::serialization("Invalid trend document", e))?;

        pairs
            .into_iter()
            .map(|(timestamp, ridership)| {
                let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                    .map_err(|e| {
                        Error::data_validation(format!(
                            "Invalid trend timestamp '{}': {}",
                            timestamp, e
                        ))
                    })?
                    .with_timezone(&Utc);
                Ok(TrendPoint {
                    timestamp,
                    ridership,
                })
            })
            .collect()
    }
}

/// One point of a system trend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub ridership: f64,
}

/// Serialize trend points the way they are stored
pub fn encode_trend(points: &[TrendPoint]) -> Result<String> {
    let pairs: Vec<(String, f64)> = points
        .iter()
        .map(|point| (point.timestamp.to_rfc3339(), point.ridership))
        .collect();
    serde_json::to_string(&pairs).map_err(|e| Error::serialization("Failed to encode trend", e))
}

// =============================================================================
// ETL Reports
// =============================================================================

/// Kind of ETL sub-run an audit record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EtlType {
    RouteInfo,
    DailyRidership,
    ServiceHourRidership,
}

impl EtlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EtlType::RouteInfo => etl_types::ROUTE_INFO,
            EtlType::DailyRidership => etl_types::DAILY_RIDERSHIP,
            EtlType::ServiceHourRidership => etl_types::SERVICE_HOUR_RIDERSHIP,
        }
    }
}

impl fmt::Display for EtlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit record for one ETL sub-run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlReport {
    /// Store-assigned id; zero until the report is stored
    pub id: u64,
    pub etl_type: EtlType,
    pub created_on: DateTime<Utc>,
    pub creates: usize,
    pub updates: usize,

    /// Row count for the report's model type after the run
    pub total_models: usize,
}

impl EtlReport {
    /// Start an empty report for a sub-run
    pub fn new(etl_type: EtlType) -> Self {
        Self {
            id: 0,
            etl_type,
            created_on: Utc::now(),
            creates: 0,
            updates: 0,
            total_models: 0,
        }
    }

    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.creates += 1,
            UpsertOutcome::Updated => self.updates += 1,
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{}: {} created, {} updated, {} total",
            self.etl_type, self.creates, self.updates, self.total_models
        )
    }
}
