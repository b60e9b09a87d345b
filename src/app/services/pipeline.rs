//! Full ETL run over one workbook
//!
//! Stages run in a fixed order and each commits the store when it finishes:
//!
//! 1. Route directory from the daily ridership worksheets
//! 2. Daily ridership facts
//! 3. Service-hour ridership facts
//! 4. System ridership
//! 5. System trends
//! 6. Weekly performance
//! 7. High-ridership routes
//!
//! A failure stops the run at the failing stage. Earlier stages stay applied.

use crate::app::models::{EtlReport, RidershipKind};
use crate::app::services::aggregation::{
    update_high_ridership_routes, update_system_ridership, update_system_trends,
    update_weekly_performance,
};
use crate::app::services::grid::Workbook;
use crate::app::services::quality::check_worksheets;
use crate::app::services::ridership_versioner::update_ridership;
use crate::app::services::route_directory::update_route_info;
use crate::app::services::store::RidershipStore;
use crate::config::Config;
use crate::{Error, Result};
use std::time::{Duration, Instant};
use tracing::info;

/// What one ETL run did to the store
#[derive(Debug, Clone)]
pub struct EtlRunSummary {
    pub route_info: EtlReport,
    pub daily_ridership: EtlReport,
    pub service_hour_ridership: EtlReport,

    /// Active system ridership rows written
    pub system_ridership_rows: usize,

    /// Service types whose trend was rewritten
    pub system_trends: usize,

    pub weekly_created: usize,
    pub weekly_updated: usize,

    /// Flagged route numbers in rank order
    pub high_ridership_routes: Vec<i64>,

    pub elapsed: Duration,
}

/// Run every ETL stage for `workbook` against `store`
///
/// All configured worksheets are checked before the store is touched; the
/// first one missing is returned as `WorksheetNotFound`.
pub fn run_excel_etl<S: RidershipStore + ?Sized>(
    workbook: &Workbook,
    store: &mut S,
    config: &Config,
) -> Result<EtlRunSummary> {
    let start = Instant::now();
    let locator = config.period_locator()?;
    let worksheets = &config.worksheets;

    let configured: Vec<&str> = worksheets
        .daily_ridership
        .iter()
        .chain(&worksheets.hour_productivity)
        .map(String::as_str)
        .collect();
    let check = check_worksheets(workbook, &configured);
    if let Some(missing) = check.missing.into_iter().next() {
        return Err(Error::worksheet_not_found(missing));
    }

    info!("Importing route directory");
    let route_info = update_route_info(workbook, store, &worksheets.daily_ridership)?;

    info!("Importing daily ridership");
    let daily_ridership = update_ridership(
        workbook,
        &worksheets.daily_ridership,
        RidershipKind::Daily,
        store,
        &locator,
    )?;

    info!("Importing service-hour ridership");
    let service_hour_ridership = update_ridership(
        workbook,
        &worksheets.hour_productivity,
        RidershipKind::ServiceHour,
        store,
        &locator,
    )?;

    info!("Aggregating");
    let system_ridership_rows = update_system_ridership(store)?;
    let system_trends = update_system_trends(store, locator.calibrator())?;
    let (weekly_created, weekly_updated) =
        update_weekly_performance(store, locator.calibrator())?;
    let high_ridership_routes =
        update_high_ridership_routes(store, config.etl.high_ridership_count)?;

    let summary = EtlRunSummary {
        route_info,
        daily_ridership,
        service_hour_ridership,
        system_ridership_rows,
        system_trends,
        weekly_created,
        weekly_updated,
        high_ridership_routes,
        elapsed: start.elapsed(),
    };

    info!("ETL run complete in {:.2?}", summary.elapsed);
    Ok(summary)
}
