//! Tests for merging route scans

use super::*;
use crate::app::services::route_directory::merge_route_data;

#[test]
fn test_last_worksheet_wins() {
    let first = routes_result(&[("1", "A")]);
    let second = routes_result(&[("1", "B"), ("2", "C")]);

    let merged = merge_route_data(&[first, second]);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged["1"].route_name, "B");
    assert_eq!(merged["2"].route_name, "C");
}

#[test]
fn test_merge_order_matters() {
    let first = routes_result(&[("1", "A")]);
    let second = routes_result(&[("1", "B"), ("2", "C")]);

    let merged = merge_route_data(&[second, first]);

    assert_eq!(merged["1"].route_name, "A");
    assert_eq!(merged["2"].route_name, "C");
}

#[test]
fn test_merge_nothing() {
    assert!(merge_route_data(&[]).is_empty());
    assert!(merge_route_data(&[WorksheetRoutes::default()]).is_empty());
}
