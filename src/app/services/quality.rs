//! Workbook quality checks run before an import
//!
//! None of the checks touch the store. They answer "is this the workbook we
//! expect?" so a bad export can be rejected before any fact is versioned.

use crate::Result;
use crate::app::services::grid::{Grid, Workbook};
use crate::app::services::period_locator::PeriodLocator;
use crate::app::services::route_directory::extract_routes;
use tracing::{debug, warn};

/// Outcome of a worksheet presence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetCheck {
    /// Every required worksheet is present
    pub complete: bool,

    /// Required names not found, in the order they were requested
    pub missing: Vec<String>,
}

/// Route identities visible in one worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteInfoCheck {
    pub numbers_available: bool,
    pub names_available: bool,
    pub route_numbers: Vec<String>,
    pub route_names: Vec<String>,
}

/// Check that each of `required` names a worksheet in `workbook`
pub fn check_worksheets(workbook: &Workbook, required: &[&str]) -> WorksheetCheck {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| workbook.sheet_by_name(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        debug!("All {} required worksheets present", required.len());
    } else {
        warn!("Missing worksheets: {}", missing.join(", "));
    }

    WorksheetCheck {
        complete: missing.is_empty(),
        missing,
    }
}

/// Check that each named worksheet has at least one ridership period column
///
/// `missing` lists the worksheets where no period header was located, in the
/// order they were requested. A worksheet absent from the workbook has no
/// period columns and is listed too.
pub fn check_ridership_columns<N: AsRef<str>>(
    workbook: &Workbook,
    names: &[N],
    locator: &PeriodLocator,
) -> Result<WorksheetCheck> {
    let mut missing = Vec::new();

    for name in names {
        let name = name.as_ref();
        let period_count = match workbook.sheet_by_name(name) {
            Some(worksheet) => locator.locate_periods(worksheet)?.len(),
            None => 0,
        };

        if period_count == 0 {
            missing.push(name.to_string());
        } else {
            debug!("Worksheet '{}' has {} ridership columns", name, period_count);
        }
    }

    if !missing.is_empty() {
        warn!("Worksheets without ridership columns: {}", missing.join(", "));
    }

    Ok(WorksheetCheck {
        complete: missing.is_empty(),
        missing,
    })
}

/// List the route numbers and names a worksheet would contribute
pub fn check_route_info<G: Grid + ?Sized>(grid: &G) -> RouteInfoCheck {
    let routes = extract_routes(grid);

    let route_names = if routes.names_available {
        routes
            .routes
            .iter()
            .map(|info| info.route_name.clone())
            .collect()
    } else {
        Vec::new()
    };

    RouteInfoCheck {
        numbers_available: routes.numbers_available,
        names_available: routes.names_available,
        route_numbers: routes
            .routes
            .iter()
            .map(|info| info.route_number.clone())
            .collect(),
        route_names,
    }
}
