//! Tests for cell typing

use crate::app::services::grid::Cell;

#[test]
fn test_blank_raw_values_are_empty() {
    assert_eq!(Cell::from_raw(""), Cell::Empty);
    assert_eq!(Cell::from_raw("   "), Cell::Empty);
}

#[test]
fn test_numeric_raw_values_are_numbers() {
    assert_eq!(Cell::from_raw("42"), Cell::Number(42.0));
    assert_eq!(Cell::from_raw(" 10997.5717761557 "), Cell::Number(10997.5717761557));
    assert_eq!(Cell::from_raw("-3.5"), Cell::Number(-3.5));
}

#[test]
fn test_grouped_numbers_are_numbers() {
    assert_eq!(Cell::from_raw("12,345"), Cell::Number(12345.0));
    assert_eq!(Cell::from_raw("1,234,567.25"), Cell::Number(1234567.25));
}

#[test]
fn test_text_raw_values_are_trimmed_text() {
    assert_eq!(Cell::from_raw(" Spring 2015 "), Cell::Text("Spring 2015".to_string()));
    assert_eq!(Cell::from_raw("12,34"), Cell::Text("12,34".to_string()));
}

#[test]
fn test_non_finite_numbers_stay_text() {
    assert_eq!(Cell::from_raw("NaN"), Cell::Text("NaN".to_string()));
    assert_eq!(Cell::from_raw("inf"), Cell::Text("inf".to_string()));
}

#[test]
fn test_accessors() {
    let number = Cell::Number(7.0);
    let text = Cell::Text("Route".to_string());

    assert_eq!(number.as_number(), Some(7.0));
    assert_eq!(number.as_text(), None);
    assert_eq!(text.as_text(), Some("Route"));
    assert_eq!(text.as_number(), None);
    assert!(Cell::Empty.is_empty());
}
