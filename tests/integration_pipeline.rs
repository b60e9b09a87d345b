//! End-to-end tests for the ridership ETL
//!
//! Each test writes a workbook of CSV worksheet exports into a temporary
//! directory, runs the full pipeline against a snapshot-backed store and
//! reopens the snapshot to check what was persisted.

use ridership_etl::app::models::{DayOfWeek, RidershipKind, Season};
use ridership_etl::app::services::aggregation::{productivity_series, top_route_compendiums};
use ridership_etl::app::services::pipeline::run_excel_etl;
use ridership_etl::app::services::quality::check_worksheets;
use ridership_etl::constants::REQUIRED_WORKSHEETS;
use ridership_etl::{Config, Error, InMemoryStore, RidershipStore, Workbook};
use std::path::Path;
use tempfile::TempDir;

/// (route, name, type)
const ROUTES: &[(&str, &str, &str)] = &[
    ("1", "1-North Lamar/South Congress", "Local"),
    ("7", "7-Duval/Dove Springs", "Local"),
    ("550", "MetroRail Red Line", "MetroRail"),
    ("801", "801-North/South MetroRapid", "MetroRapid"),
];

/// Spring 2015 and Fall 2015 weekday ridership, in ROUTES order
const WEEKDAY: &[(f64, f64)] = &[
    (12000.0, 12500.0),
    (8000.0, 7900.0),
    (2500.0, 2600.0),
    (9000.0, 9500.0),
];

fn write_worksheet(dir: &Path, name: &str, day: &str, values: &[(f64, f64)]) {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(dir.join(format!("{}.csv", name)))
        .unwrap();

    writer.write_record([name, "", "", "", ""]).unwrap();
    writer
        .write_record(["", "", "", "Spring 2015", "Fall 2015"])
        .unwrap();
    writer.write_record(["", "", "", day, day]).unwrap();
    writer
        .write_record(["Route", "Route Name", "Route Type", "", ""])
        .unwrap();
    for ((number, name, service_type), (spring, fall)) in ROUTES.iter().zip(values) {
        writer
            .write_record([
                number.to_string(),
                name.to_string(),
                service_type.to_string(),
                spring.to_string(),
                fall.to_string(),
            ])
            .unwrap();
    }
    writer.write_record(["Total", "", "", "", ""]).unwrap();
    writer.flush().unwrap();
}

fn scaled(values: &[(f64, f64)], factor: f64) -> Vec<(f64, f64)> {
    values
        .iter()
        .map(|(spring, fall)| (spring * factor, fall * factor))
        .collect()
}

/// Workbook with all six canonical worksheets
fn write_workbook(dir: &Path, weekday: &[(f64, f64)]) {
    std::fs::create_dir_all(dir).unwrap();

    write_worksheet(dir, "Ridership by Route Weekday", "Weekday", weekday);
    write_worksheet(dir, "Ridership by Route Saturday", "Saturday", &scaled(weekday, 0.5));
    write_worksheet(dir, "Ridership by Route Sunday", "Sunday", &scaled(weekday, 0.25));

    let hours = [(60.0, 62.0), (40.0, 38.0), (120.0, 125.0), (70.0, 72.0)];
    write_worksheet(dir, "Riders per Hour Weekday", "Weekday", &hours);
    write_worksheet(dir, "Riders Hour Saturday", "Saturday", &scaled(&hours, 0.5));
    write_worksheet(dir, "Riders per Hour Sunday", "Sunday", &scaled(&hours, 0.5));
}

fn config(store_path: &Path) -> Config {
    Config::default()
        .with_store_path(store_path)
        .with_high_ridership_count(2)
}

#[test]
fn test_full_import_is_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_dir = temp_dir.path().join("workbook");
    let store_path = temp_dir.path().join("store").join("ridership.json");
    write_workbook(&workbook_dir, WEEKDAY);

    let workbook = Workbook::open(&workbook_dir).unwrap();
    assert!(check_worksheets(&workbook, REQUIRED_WORKSHEETS).complete);

    let mut store = InMemoryStore::open(&store_path).unwrap();
    let summary = run_excel_etl(&workbook, &mut store, &config(&store_path)).unwrap();

    assert_eq!(summary.route_info.creates, 4);
    assert_eq!(summary.daily_ridership.creates, 24);
    assert_eq!(summary.service_hour_ridership.creates, 24);
    assert_eq!(summary.system_ridership_rows, 18);
    assert_eq!(summary.system_trends, 3);
    assert_eq!((summary.weekly_created, summary.weekly_updated), (8, 0));
    assert_eq!(summary.high_ridership_routes, vec![1, 801]);

    let reopened = InMemoryStore::open(&store_path).unwrap();
    assert_eq!(reopened.tables(), store.tables());

    let metrorail = reopened.find_route_by_number(550).unwrap();
    assert_eq!(metrorail.route_name, "METRORAIL RED LINE");
    assert_eq!(metrorail.service_type, "METRORAIL");
    assert!(!metrorail.is_high_ridership);
    assert!(reopened.find_route_by_number(1).unwrap().is_high_ridership);
    assert_eq!(reopened.reports().len(), 3);
}

#[test]
fn test_weekly_performance_and_trends() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_dir = temp_dir.path().join("workbook");
    let store_path = temp_dir.path().join("ridership.json");
    write_workbook(&workbook_dir, WEEKDAY);

    let workbook = Workbook::open(&workbook_dir).unwrap();
    let mut store = InMemoryStore::open(&store_path).unwrap();
    run_excel_etl(&workbook, &mut store, &config(&store_path)).unwrap();

    let route_1 = store.find_route_by_number(1).unwrap();
    let spring = store
        .weekly_performances()
        .into_iter()
        .find(|weekly| {
            weekly.route_id == route_1.id
                && weekly.season == Season::Spring
                && weekly.calendar_year == 2015
        })
        .unwrap();
    // 5 x 12000 + 6000 + 3000
    assert_eq!(spring.ridership, 69000.0);
    // mean of 60, 30, 30
    assert_eq!(spring.productivity, Some(40.0));

    let local = store
        .system_trends()
        .into_iter()
        .find(|trend| trend.service_type == "LOCAL")
        .unwrap();
    let points = local.points().unwrap();
    assert_eq!(points.len(), 2);
    // routes 1 and 7: 5 x 20000 + 10000 + 5000
    assert_eq!(points[0].ridership, 115000.0);
    assert!(points[0].timestamp < points[1].timestamp);

    let series = productivity_series(&store);
    assert_eq!(series.len(), 2);
    assert!(series[0].date > series[1].date);
    assert_eq!(series[0].performance.len(), 4);
}

#[test]
fn test_reimport_supersedes_and_reranks() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_dir = temp_dir.path().join("workbook");
    let store_path = temp_dir.path().join("ridership.json");
    write_workbook(&workbook_dir, WEEKDAY);

    {
        let workbook = Workbook::open(&workbook_dir).unwrap();
        let mut store = InMemoryStore::open(&store_path).unwrap();
        run_excel_etl(&workbook, &mut store, &config(&store_path)).unwrap();
    }

    let mut revised = WEEKDAY.to_vec();
    revised[1] = (8000.0, 13000.0);
    write_workbook(&workbook_dir, &revised);

    let workbook = Workbook::open(&workbook_dir).unwrap();
    let mut store = InMemoryStore::open(&store_path).unwrap();
    let summary = run_excel_etl(&workbook, &mut store, &config(&store_path)).unwrap();

    assert_eq!(summary.route_info.creates, 0);
    assert_eq!(summary.route_info.updates, 4);
    assert_eq!(summary.daily_ridership.creates, 24);
    assert_eq!(summary.daily_ridership.updates, 24);
    assert_eq!(summary.daily_ridership.total_models, 48);
    assert_eq!(store.current_facts(RidershipKind::Daily).len(), 24);
    assert_eq!(summary.high_ridership_routes, vec![7, 1]);
    assert_eq!(store.active_system_ridership().len(), 18);
    assert_eq!(store.system_ridership().len(), 36);

    let route_7 = store.find_route_by_number(7).unwrap();
    let fall_weekday = store
        .current_facts(RidershipKind::Daily)
        .into_iter()
        .find(|fact| {
            fact.route_id == route_7.id
                && fact.season == Season::Fall
                && fact.day_of_week == DayOfWeek::Weekday
        })
        .unwrap();
    assert_eq!(fall_weekday.ridership, 13000.0);

    assert!(route_7.is_high_ridership);
    let top_routes = top_route_compendiums(&store);
    assert_eq!(top_routes.len(), 2);
    assert!(top_routes.iter().any(|compendium| compendium.route_number == 7));
}

#[test]
fn test_missing_worksheet_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let workbook_dir = temp_dir.path().join("workbook");
    let store_path = temp_dir.path().join("ridership.json");
    write_workbook(&workbook_dir, WEEKDAY);
    std::fs::remove_file(workbook_dir.join("Riders Hour Saturday.csv")).unwrap();

    let workbook = Workbook::open(&workbook_dir).unwrap();
    let check = check_worksheets(&workbook, REQUIRED_WORKSHEETS);
    assert_eq!(check.missing, vec!["Riders Hour Saturday".to_string()]);

    let mut store = InMemoryStore::open(&store_path).unwrap();
    let err = run_excel_etl(&workbook, &mut store, &config(&store_path)).unwrap_err();

    assert!(matches!(err, Error::WorksheetNotFound { .. }));
    assert!(!store_path.exists());
}
