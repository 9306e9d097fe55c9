use std::collections::HashSet;

use agroreport_core::aggregation::{
    aggregate_records, aggregate_table, extract_records, normalize_record, FlightRecord,
};
use agroreport_core::time_codec::decode_duration;
use agroreport_core::ReportError;
use agroreport_parser::parse_flight_log;

const HEADER: &str =
    "Flight time,Location,Sprayed area,Flight duration(min:sec),Total Amount(L/Kg)\n";

fn log(rows: &[&str]) -> String {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

fn sample_records() -> Vec<FlightRecord> {
    let content = log(&[
        "2024-03-02 07:00:00,South,1.5,2:00,3",
        "2024-03-01 08:00:00,North,3,1:00,12.5",
        "2024-03-01 09:00:00,South,2,bogus,4",
        "2024-03-01 10:00:00,North,4,1:00,15",
        "2024-03-02 11:00:00,North,oops,0:30,",
        "2024-03-01 12:00:00,Centre,0.5,10:15,1",
    ]);
    let table = parse_flight_log(&content).expect("parse");
    extract_records(&table).expect("extract")
}

#[test]
fn groups_by_date_and_location_in_key_order() {
    let aggregation = aggregate_records(&sample_records());
    let keys: Vec<(&str, &str)> = aggregation
        .groups
        .iter()
        .map(|group| (group.date.as_str(), group.location.as_str()))
        .collect();

    assert_eq!(
        keys,
        [
            ("2024-03-01", "Centre"),
            ("2024-03-01", "North"),
            ("2024-03-01", "South"),
            ("2024-03-02", "North"),
            ("2024-03-02", "South"),
        ]
    );
}

#[test]
fn group_count_matches_distinct_keys() {
    let records = sample_records();
    let distinct: HashSet<(String, String)> = records
        .iter()
        .map(normalize_record)
        .map(|flight| (flight.date, flight.location))
        .collect();

    let aggregation = aggregate_records(&records);
    assert_eq!(aggregation.groups.len(), distinct.len());
}

#[test]
fn totals_are_conserved() {
    let records = sample_records();
    let aggregation = aggregate_records(&records);

    let flights: u64 = aggregation.groups.iter().map(|g| g.flight_count).sum();
    assert_eq!(flights as usize, records.len());
    assert_eq!(aggregation.record_count, records.len());

    let decoded: u64 = records
        .iter()
        .map(|record| decode_duration(record.flight_duration.as_deref().unwrap_or_default()))
        .sum();
    let grouped: u64 = aggregation
        .groups
        .iter()
        .map(|g| g.total_duration_seconds)
        .sum();
    assert_eq!(grouped, decoded);

    assert!(aggregation.groups.iter().all(|g| g.flight_count >= 1));
}

#[test]
fn sums_area_supply_and_duration_per_group() {
    let aggregation = aggregate_records(&sample_records());
    let north = aggregation
        .groups
        .iter()
        .find(|g| g.date == "2024-03-01" && g.location == "North")
        .expect("north group");

    assert_eq!(north.total_area_raw, 7.0);
    assert_eq!(north.total_supply, 27.5);
    assert_eq!(north.total_duration_seconds, 120);
    assert_eq!(north.flight_count, 2);

    let late_north = aggregation
        .groups
        .iter()
        .find(|g| g.date == "2024-03-02" && g.location == "North")
        .expect("late north group");
    assert_eq!(late_north.total_area_raw, 0.0);
    assert_eq!(late_north.total_supply, 0.0);
    assert_eq!(late_north.total_duration_seconds, 30);
}

#[test]
fn malformed_values_are_counted_not_fatal() {
    let aggregation = aggregate_records(&sample_records());
    assert_eq!(aggregation.malformed.sprayed_area, 1);
    assert_eq!(aggregation.malformed.flight_duration, 1);
    assert_eq!(aggregation.malformed.total_amount, 0);
    assert_eq!(aggregation.malformed.affected_records, 2);
}

#[test]
fn missing_column_is_fatal_and_named() {
    let content = "Flight time,Location,Sprayed area,Total Amount(L/Kg)\n2024-03-01 08:00:00,North,3,12.5\n";
    let table = parse_flight_log(content).expect("parse");

    let err = aggregate_table(&table).expect_err("missing duration column");
    match &err {
        ReportError::MissingColumn { column } => assert_eq!(column, "Flight duration(min:sec)"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("Flight duration(min:sec)"));
}

#[test]
fn padded_headers_still_satisfy_required_columns() {
    let content = " Flight time , Location ,Sprayed area ,Flight duration(min:sec), Total Amount(L/Kg)\n2024-03-01 08:00:00,North,3,1:00,12.5\n";
    let table = parse_flight_log(content).expect("parse");
    let aggregation = aggregate_table(&table).expect("aggregate");
    assert_eq!(aggregation.groups.len(), 1);
}

#[test]
fn empty_log_produces_no_groups() {
    let table = parse_flight_log(HEADER).expect("parse");
    let aggregation = aggregate_table(&table).expect("aggregate");
    assert!(aggregation.groups.is_empty());
    assert_eq!(aggregation.record_count, 0);
}

#[test]
fn aggregation_is_repeatable() {
    let records = sample_records();
    let first = aggregate_records(&records);
    let second = aggregate_records(&records);
    assert_eq!(first.groups, second.groups);
}

#[test]
fn semicolon_log_with_decimal_commas_keeps_its_areas() {
    let content = "Flight time;Location;Sprayed area;Flight duration(min:sec);Total Amount(L/Kg)\n\
                   2024-04-11 06:00:00;Parcela Oeste;2,5;2:00;10,25\n\
                   2024-04-11 06:30:00;Parcela Oeste;1,5;1:00;4\n";
    let table = parse_flight_log(content).expect("parse");
    let aggregation = aggregate_table(&table).expect("aggregate");

    assert_eq!(aggregation.groups.len(), 1);
    let group = &aggregation.groups[0];
    assert!((group.total_area_raw - 4.0).abs() < 1e-9);
    assert!((group.total_supply - 14.25).abs() < 1e-9);
    assert_eq!(group.total_duration_seconds, 180);
    assert_eq!(aggregation.malformed.total(), 0);
}
