//! Merging route scans from several worksheets

use super::extraction::WorksheetRoutes;
use crate::app::models::RouteInfo;
use std::collections::BTreeMap;

/// Route info keyed by digit-only route number label
pub type RouteDirectory = BTreeMap<String, RouteInfo>;

/// Merge worksheet scans in order; a later worksheet overwrites an earlier
/// one for the same route number
pub fn merge_route_data(results: &[WorksheetRoutes]) -> RouteDirectory {
    let mut merged = RouteDirectory::new();
    for result in results {
        for info in &result.routes {
            merged.insert(info.route_number.clone(), info.clone());
        }
    }
    merged
}
