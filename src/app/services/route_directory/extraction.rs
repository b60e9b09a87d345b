//! Route scanning within a single worksheet

use crate::app::models::RouteInfo;
use crate::app::services::grid::{Cell, Grid};
use crate::constants::headers;
use tracing::debug;

/// Routes found in one worksheet, with the header flags that were seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetRoutes {
    /// A "Route" header cell was found in column 0
    pub numbers_available: bool,

    /// The route header row had "Route Name" in column 1
    pub names_available: bool,

    /// The route header row had "Route Type" in column 2
    pub types_available: bool,

    /// Route rows in worksheet order
    pub routes: Vec<RouteInfo>,
}

/// Walk column 0 top to bottom collecting route rows
///
/// A "Route" text cell marks the header row and decides whether names and
/// service types are trusted from columns 1 and 2. Every numeric cell in
/// column 0 is a route row. Names and types are only taken from text cells
/// and are upper-cased; a missing name falls back to the route number.
pub fn extract_routes<G: Grid + ?Sized>(grid: &G) -> WorksheetRoutes {
    let mut result = WorksheetRoutes::default();

    for row in 0..grid.row_count() {
        let Some(cell) = grid.cell(row, headers::ROUTE_NUMBER_COLUMN) else {
            continue;
        };

        if check_for_headers(grid, row, cell, &mut result) {
            continue;
        }

        let Some(route_number) = route_number(cell) else {
            continue;
        };

        let mut info = RouteInfo::new(route_number);
        if result.names_available {
            if let Some(name) = grid.text(row, headers::ROUTE_NAME_COLUMN) {
                info.route_name = name.to_uppercase();
            }
        }
        if result.types_available {
            if let Some(service_type) = grid.text(row, headers::ROUTE_TYPE_COLUMN) {
                info.service_type = service_type.to_uppercase();
            }
        }
        result.routes.push(info);
    }

    debug!(
        "Worksheet '{}': {} routes (names: {}, types: {})",
        grid.name(),
        result.routes.len(),
        result.names_available,
        result.types_available
    );

    result
}

/// Route number held by a numeric column-0 cell, truncated to an integer
pub fn route_number(cell: &Cell) -> Option<i64> {
    cell.as_number().map(|value| value.trunc() as i64)
}

fn check_for_headers<G: Grid + ?Sized>(
    grid: &G,
    row: usize,
    cell: &Cell,
    result: &mut WorksheetRoutes,
) -> bool {
    if cell.as_text() != Some(headers::ROUTE_NUMBER) {
        return false;
    }

    result.numbers_available = true;
    if grid.text(row, headers::ROUTE_NAME_COLUMN) == Some(headers::ROUTE_NAME) {
        result.names_available = true;
    }
    if grid.text(row, headers::ROUTE_TYPE_COLUMN) == Some(headers::ROUTE_TYPE) {
        result.types_available = true;
    }
    true
}
