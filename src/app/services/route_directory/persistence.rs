//! Writing the route directory to the store

use super::extraction::extract_routes;
use super::merge::merge_route_data;
use crate::app::models::{EtlReport, EtlType, RouteInfo, UpsertOutcome};
use crate::app::services::grid::Workbook;
use crate::app::services::store::RidershipStore;
use crate::{Error, Result};
use tracing::{debug, info};

/// Create or update the route for `route_info`
///
/// Route name and service type are upper-cased on every write.
pub fn store_route<S: RidershipStore + ?Sized>(
    store: &mut S,
    route_info: &RouteInfo,
) -> Result<UpsertOutcome> {
    let route_number: i64 = route_info.route_number.trim().parse().map_err(|_| {
        Error::data_validation(format!(
            "Route number '{}' is not an integer",
            route_info.route_number
        ))
    })?;
    let route_name = route_info.route_name.to_uppercase();
    let service_type = route_info.service_type.to_uppercase();

    match store.find_route_by_number(route_number) {
        Some(mut route) => {
            route.route_name = route_name;
            route.service_type = service_type;
            store.update_route(&route)?;
            debug!("Updated route {}", route_number);
            Ok(UpsertOutcome::Updated)
        }
        None => {
            store.insert_route(route_number, &route_name, &service_type)?;
            debug!("Created route {}", route_number);
            Ok(UpsertOutcome::Created)
        }
    }
}

/// Import route identities from the named worksheets
///
/// Every named worksheet must exist. The report is appended to the store and
/// the store is committed before returning.
pub fn update_route_info<S: RidershipStore + ?Sized>(
    workbook: &Workbook,
    store: &mut S,
    worksheet_names: &[String],
) -> Result<EtlReport> {
    let mut results = Vec::with_capacity(worksheet_names.len());
    for name in worksheet_names {
        let worksheet = workbook.require_sheet(name)?;
        results.push(extract_routes(worksheet));
    }

    let directory = merge_route_data(&results);
    let mut report = EtlReport::new(EtlType::RouteInfo);
    for route_info in directory.values() {
        report.record(store_route(store, route_info)?);
    }
    report.total_models = store.count_routes();

    let report = store.insert_report(report)?;
    store.commit()?;

    info!("Route import complete - {}", report.summary());
    Ok(report)
}
