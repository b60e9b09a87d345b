//! In-memory ridership store

use super::RidershipStore;
use super::snapshot;
use crate::app::models::{
    EtlReport, NewRidershipFact, PeriodKey, RidershipFact, RidershipKind, Route, SystemRidership,
    SystemTrend, UpsertOutcome, WeeklyPerformance,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type CurrentFactKey = (RidershipKind, u64, PeriodKey);

/// Every table of the store, keyed by row id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreTables {
    pub(crate) next_id: u64,
    pub(crate) routes: BTreeMap<u64, Route>,
    pub(crate) daily_ridership: BTreeMap<u64, RidershipFact>,
    pub(crate) service_hour_ridership: BTreeMap<u64, RidershipFact>,
    pub(crate) weekly_performance: BTreeMap<u64, WeeklyPerformance>,
    pub(crate) system_ridership: BTreeMap<u64, SystemRidership>,
    pub(crate) system_trends: BTreeMap<u64, SystemTrend>,
    pub(crate) etl_reports: BTreeMap<u64, EtlReport>,
}

impl StoreTables {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn facts(&self, kind: RidershipKind) -> &BTreeMap<u64, RidershipFact> {
        match kind {
            RidershipKind::Daily => &self.daily_ridership,
            RidershipKind::ServiceHour => &self.service_hour_ridership,
        }
    }

    fn facts_mut(&mut self, kind: RidershipKind) -> &mut BTreeMap<u64, RidershipFact> {
        match kind {
            RidershipKind::Daily => &mut self.daily_ridership,
            RidershipKind::ServiceHour => &mut self.service_hour_ridership,
        }
    }
}

/// Lookup indexes over `StoreTables`
///
/// Never persisted; rebuilt whenever tables are loaded.
#[derive(Debug, Clone, Default)]
struct StoreIndex {
    route_ids: HashMap<i64, u64>,
    current_facts: HashMap<CurrentFactKey, u64>,
}

impl StoreIndex {
    fn build(tables: &StoreTables) -> Result<Self> {
        let mut index = Self::default();

        for route in tables.routes.values() {
            if index.route_ids.insert(route.route_number, route.id).is_some() {
                return Err(Error::store_integrity(format!(
                    "Route number {} appears more than once",
                    route.route_number
                )));
            }
        }

        for kind in [RidershipKind::Daily, RidershipKind::ServiceHour] {
            for fact in tables.facts(kind).values().filter(|fact| fact.is_current) {
                let key = (kind, fact.route_id, fact.period_key());
                if index.current_facts.insert(key, fact.id).is_some() {
                    return Err(Error::store_integrity(format!(
                        "Multiple current {} facts for route_id {} in {}",
                        kind,
                        fact.route_id,
                        fact.period_key()
                    )));
                }
            }
        }

        Ok(index)
    }
}

/// Store holding all tables in memory, optionally backed by a JSON snapshot
///
/// Without a snapshot path, `commit` is a no-op and the store lives as long
/// as the value does. With one, `commit` rewrites the snapshot file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: StoreTables,
    index: StoreIndex,
    snapshot_path: Option<PathBuf>,
}

impl InMemoryStore {
    /// Create an empty, non-persistent store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a snapshot-backed store, loading the snapshot if it exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tables = if path.exists() {
            let tables = snapshot::load(path)?;
            info!(
                "Loaded store snapshot {} ({} routes, {} daily facts)",
                path.display(),
                tables.routes.len(),
                tables.daily_ridership.len()
            );
            tables
        } else {
            debug!("No store snapshot at {}, starting empty", path.display());
            StoreTables::default()
        };

        Ok(Self {
            index: StoreIndex::build(&tables)?,
            tables,
            snapshot_path: Some(path.to_path_buf()),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    pub fn tables(&self) -> &StoreTables {
        &self.tables
    }

    fn require_route(&self, route_id: u64) -> Result<()> {
        if self.tables.routes.contains_key(&route_id) {
            Ok(())
        } else {
            Err(Error::route_not_found(route_id))
        }
    }
}

impl RidershipStore for InMemoryStore {
    fn find_route_by_number(&self, route_number: i64) -> Option<Route> {
        self.index
            .route_ids
            .get(&route_number)
            .and_then(|id| self.tables.routes.get(id))
            .cloned()
    }

    fn route(&self, route_id: u64) -> Option<Route> {
        self.tables.routes.get(&route_id).cloned()
    }

    fn insert_route(
        &mut self,
        route_number: i64,
        route_name: &str,
        service_type: &str,
    ) -> Result<Route> {
        if self.index.route_ids.contains_key(&route_number) {
            return Err(Error::store_integrity(format!(
                "Route number {} already exists",
                route_number
            )));
        }

        let route = Route {
            id: self.tables.allocate_id(),
            route_number,
            route_name: route_name.to_string(),
            service_type: service_type.to_string(),
            is_high_ridership: false,
        };
        self.tables.routes.insert(route.id, route.clone());
        self.index.route_ids.insert(route_number, route.id);
        Ok(route)
    }

    fn update_route(&mut self, route: &Route) -> Result<()> {
        self.require_route(route.id)?;

        let clash = self
            .index
            .route_ids
            .get(&route.route_number)
            .is_some_and(|&owner| owner != route.id);
        if clash {
            return Err(Error::store_integrity(format!(
                "Route number {} already exists",
                route.route_number
            )));
        }

        let stored = self
            .tables
            .routes
            .get_mut(&route.id)
            .ok_or_else(|| Error::route_not_found(route.id))?;
        let previous_number = stored.route_number;
        *stored = route.clone();

        if previous_number != route.route_number {
            self.index.route_ids.remove(&previous_number);
            self.index.route_ids.insert(route.route_number, route.id);
        }
        Ok(())
    }

    fn routes(&self) -> Vec<Route> {
        self.tables.routes.values().cloned().collect()
    }

    fn count_routes(&self) -> usize {
        self.tables.routes.len()
    }

    fn clear_high_ridership(&mut self) -> usize {
        let mut cleared = 0;
        for route in self.tables.routes.values_mut() {
            if route.is_high_ridership {
                route.is_high_ridership = false;
                cleared += 1;
            }
        }
        cleared
    }

    fn set_high_ridership(&mut self, route_id: u64) -> Result<()> {
        let route = self
            .tables
            .routes
            .get_mut(&route_id)
            .ok_or_else(|| Error::route_not_found(route_id))?;
        route.is_high_ridership = true;
        Ok(())
    }

    fn find_current_fact(
        &self,
        kind: RidershipKind,
        route_id: u64,
        period: PeriodKey,
    ) -> Result<Option<RidershipFact>> {
        let Some(fact_id) = self.index.current_facts.get(&(kind, route_id, period)) else {
            return Ok(None);
        };

        self.tables
            .facts(kind)
            .get(fact_id)
            .cloned()
            .map(Some)
            .ok_or_else(|| {
                Error::store_integrity(format!(
                    "Current {} fact {} for route_id {} is missing",
                    kind, fact_id, route_id
                ))
            })
    }

    fn set_fact_current(
        &mut self,
        kind: RidershipKind,
        fact_id: u64,
        is_current: bool,
    ) -> Result<()> {
        let fact = self
            .tables
            .facts_mut(kind)
            .get_mut(&fact_id)
            .ok_or_else(|| {
                Error::store_integrity(format!("No {} fact with id {}", kind, fact_id))
            })?;
        let key = (kind, fact.route_id, fact.period_key());

        if is_current {
            if self
                .index
                .current_facts
                .get(&key)
                .is_some_and(|&other| other != fact_id)
            {
                return Err(Error::store_integrity(format!(
                    "A current {} fact already exists for route_id {} in {}",
                    kind, key.1, key.2
                )));
            }
            self.index.current_facts.insert(key, fact_id);
        } else if self.index.current_facts.get(&key) == Some(&fact_id) {
            self.index.current_facts.remove(&key);
        }

        fact.is_current = is_current;
        Ok(())
    }

    fn insert_fact(&mut self, fact: NewRidershipFact) -> Result<RidershipFact> {
        self.require_route(fact.route_id)?;

        let key = (fact.kind, fact.route_id, fact.period);
        if self.index.current_facts.contains_key(&key) {
            return Err(Error::store_integrity(format!(
                "A current {} fact already exists for route_id {} in {}",
                fact.kind, fact.route_id, fact.period
            )));
        }

        let stored = RidershipFact {
            id: self.tables.allocate_id(),
            kind: fact.kind,
            route_id: fact.route_id,
            season: fact.period.season,
            calendar_year: fact.period.calendar_year,
            day_of_week: fact.period.day_of_week,
            ridership: fact.ridership,
            measurement_timestamp: fact.measurement_timestamp,
            created_on: fact.created_on,
            is_current: true,
        };
        self.tables
            .facts_mut(fact.kind)
            .insert(stored.id, stored.clone());
        self.index.current_facts.insert(key, stored.id);
        Ok(stored)
    }

    fn facts(&self, kind: RidershipKind) -> Vec<RidershipFact> {
        self.tables.facts(kind).values().cloned().collect()
    }

    fn current_facts(&self, kind: RidershipKind) -> Vec<RidershipFact> {
        self.tables
            .facts(kind)
            .values()
            .filter(|fact| fact.is_current)
            .cloned()
            .collect()
    }

    fn count_facts(&self, kind: RidershipKind) -> usize {
        self.tables.facts(kind).len()
    }

    fn upsert_weekly_performance(&mut self, record: WeeklyPerformance) -> Result<UpsertOutcome> {
        self.require_route(record.route_id)?;

        let existing = self.tables.weekly_performance.values_mut().find(|row| {
            row.route_id == record.route_id
                && row.season == record.season
                && row.calendar_year == record.calendar_year
        });

        match existing {
            Some(row) => {
                let id = row.id;
                *row = WeeklyPerformance { id, ..record };
                Ok(UpsertOutcome::Updated)
            }
            None => {
                let id = self.tables.allocate_id();
                self.tables
                    .weekly_performance
                    .insert(id, WeeklyPerformance { id, ..record });
                Ok(UpsertOutcome::Created)
            }
        }
    }

    fn weekly_performances(&self) -> Vec<WeeklyPerformance> {
        self.tables.weekly_performance.values().cloned().collect()
    }

    fn deactivate_system_ridership(&mut self) -> usize {
        let mut deactivated = 0;
        for row in self.tables.system_ridership.values_mut() {
            if row.is_active {
                row.is_active = false;
                deactivated += 1;
            }
        }
        deactivated
    }

    fn insert_system_ridership(&mut self, record: SystemRidership) -> Result<SystemRidership> {
        let clash = self.tables.system_ridership.values().any(|row| {
            row.is_active
                && row.period_key() == record.period_key()
                && row.service_type == record.service_type
        });
        if clash {
            return Err(Error::store_integrity(format!(
                "An active system ridership row already exists for {} {}",
                record.service_type,
                record.period_key()
            )));
        }

        let stored = SystemRidership {
            id: self.tables.allocate_id(),
            is_active: true,
            ..record
        };
        self.tables
            .system_ridership
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn system_ridership(&self) -> Vec<SystemRidership> {
        self.tables.system_ridership.values().cloned().collect()
    }

    fn active_system_ridership(&self) -> Vec<SystemRidership> {
        self.tables
            .system_ridership
            .values()
            .filter(|row| row.is_active)
            .cloned()
            .collect()
    }

    fn upsert_system_trend(
        &mut self,
        service_type: &str,
        trend: String,
        updated_on: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        if let Some(row) = self
            .tables
            .system_trends
            .values_mut()
            .find(|row| row.service_type == service_type)
        {
            row.trend = trend;
            row.updated_on = updated_on;
            return Ok(UpsertOutcome::Updated);
        }

        let id = self.tables.allocate_id();
        self.tables.system_trends.insert(
            id,
            SystemTrend {
                id,
                service_type: service_type.to_string(),
                trend,
                updated_on,
            },
        );
        Ok(UpsertOutcome::Created)
    }

    fn retain_system_trends(&mut self, service_types: &[String]) -> usize {
        let before = self.tables.system_trends.len();
        self.tables
            .system_trends
            .retain(|_, row| service_types.contains(&row.service_type));
        before - self.tables.system_trends.len()
    }

    fn system_trends(&self) -> Vec<SystemTrend> {
        self.tables.system_trends.values().cloned().collect()
    }

    fn insert_report(&mut self, report: EtlReport) -> Result<EtlReport> {
        let stored = EtlReport {
            id: self.tables.allocate_id(),
            ..report
        };
        self.tables.etl_reports.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn reports(&self) -> Vec<EtlReport> {
        self.tables.etl_reports.values().cloned().collect()
    }

    fn commit(&mut self) -> Result<()> {
        match &self.snapshot_path {
            Some(path) => snapshot::save(path, &self.tables),
            None => Ok(()),
        }
    }
}
