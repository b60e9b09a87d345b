//! Ridership extraction from worksheets

use super::versioning::version_fact;
use crate::Result;
use crate::app::models::{EtlReport, RidershipKind, UpsertOutcome};
use crate::app::services::grid::{Grid, Workbook};
use crate::app::services::period_locator::{PeriodLocator, PeriodMap};
use crate::app::services::route_directory::extraction::route_number;
use crate::app::services::store::RidershipStore;
use crate::constants::headers;
use tracing::{debug, info};

/// Version every numeric route x period value in a worksheet
///
/// A superseded fact counts as an update in `report`, a new fact as a create.
pub fn parse_worksheet_ridership<G, S>(
    grid: &G,
    periods: &PeriodMap,
    kind: RidershipKind,
    store: &mut S,
    report: &mut EtlReport,
) -> Result<()>
where
    G: Grid + ?Sized,
    S: RidershipStore + ?Sized,
{
    for row in 0..grid.row_count() {
        let Some(number) = grid
            .cell(row, headers::ROUTE_NUMBER_COLUMN)
            .and_then(route_number)
        else {
            continue;
        };

        let Some(route) = store.find_route_by_number(number) else {
            debug!(
                "Worksheet '{}' row {}: route {} not in directory, skipping",
                grid.name(),
                row,
                number
            );
            continue;
        };

        for (&column, period) in periods {
            let Some(ridership) = grid.number(row, column) else {
                continue;
            };

            let versioned = version_fact(store, kind, route.id, period, ridership)?;
            if versioned.superseded.is_some() {
                report.record(UpsertOutcome::Updated);
            }
            report.record(UpsertOutcome::Created);
        }
    }

    Ok(())
}

/// Import one kind of ridership from the named worksheets
///
/// Every named worksheet must exist. The report is appended to the store and
/// the store is committed before returning.
pub fn update_ridership<S: RidershipStore + ?Sized>(
    workbook: &Workbook,
    worksheet_names: &[String],
    kind: RidershipKind,
    store: &mut S,
    locator: &PeriodLocator,
) -> Result<EtlReport> {
    let mut report = EtlReport::new(kind.etl_type());

    for name in worksheet_names {
        let worksheet = workbook.require_sheet(name)?;
        let periods = locator.locate_periods(worksheet)?;
        parse_worksheet_ridership(worksheet, &periods, kind, store, &mut report)?;
    }

    report.total_models = store.count_facts(kind);
    let report = store.insert_report(report)?;
    store.commit()?;

    info!("Ridership import complete - {}", report.summary());
    Ok(report)
}
