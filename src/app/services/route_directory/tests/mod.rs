//! Shared test utilities and fixtures for route directory tests

use crate::app::models::RouteInfo;
use crate::app::services::grid::Worksheet;
use crate::app::services::grid::tests::sheet_from_rows;
use crate::app::services::route_directory::WorksheetRoutes;

pub mod merge_tests;

pub const WEEKDAY_SHEET: &str = "Ridership by Route Weekday";
pub const SATURDAY_SHEET: &str = "Ridership by Route Saturday";

pub fn directory_sheet(name: &str) -> Worksheet {
    sheet_from_rows(
        name,
        &[
            &["Ridership by Route", "", "", "Spring 2015"],
            &["", "", "", "Weekday"],
            &["Route", "Route Name", "Route Type", ""],
            &["1", "1-North Lamar/South Congress", "Local", "12000"],
            &["20", "20-Manor Rd/Riverside", "Local", "3000"],
            &["550", "Metrorail Red Line", "Metrorail", "2500"],
            &["", "", "", ""],
            &["Total", "", "", "17500"],
        ],
    )
}

/// Worksheet with `count` numbered routes under a full header row
pub fn numbered_routes_sheet(name: &str, count: i64) -> Worksheet {
    let mut rows: Vec<Vec<String>> = vec![
        vec!["Ridership by Route".to_string()],
        vec![
            "Route".to_string(),
            "Route Name".to_string(),
            "Route Type".to_string(),
        ],
    ];
    for number in 1..=count {
        rows.push(vec![
            number.to_string(),
            format!("{}-Route {}", number, number),
            "Local".to_string(),
        ]);
    }
    Worksheet::from_raw_rows(name, rows)
}

pub fn routes_result(routes: &[(&str, &str)]) -> WorksheetRoutes {
    WorksheetRoutes {
        numbers_available: true,
        names_available: true,
        types_available: false,
        routes: routes
            .iter()
            .map(|(number, name)| RouteInfo {
                route_number: number.to_string(),
                route_name: name.to_string(),
                service_type: String::new(),
            })
            .collect(),
    }
}
