use agroreport_core::aggregation::FlightGroup;
use agroreport_core::correction::{correct_area, correct_group, correct_groups, Correction};

fn group(area: f64, seconds: u64) -> FlightGroup {
    FlightGroup {
        date: "2024-03-01".to_string(),
        location: "North".to_string(),
        total_area_raw: area,
        total_supply: 10.0,
        total_duration_seconds: seconds,
        flight_count: 1,
    }
}

#[test]
fn rate_inside_band_is_scaled_down() {
    let (area, correction) = correct_area(5.0, 120);
    assert!((area - 0.5).abs() < 1e-12);
    assert_eq!(correction, Correction::Scaled);
}

#[test]
fn zero_duration_passes_through() {
    assert_eq!(correct_area(5.0, 0), (5.0, Correction::Unchanged));
}

#[test]
fn rate_above_band_passes_through() {
    assert_eq!(correct_area(50.0, 60), (50.0, Correction::Unchanged));
}

#[test]
fn band_edges_are_exclusive() {
    // 2 ha over 2 minutes is exactly 1 ha/min; 20 ha over 2 minutes is exactly 10 ha/min.
    assert_eq!(correct_area(2.0, 120), (2.0, Correction::Unchanged));
    assert_eq!(correct_area(20.0, 120), (20.0, Correction::Unchanged));
    assert_eq!(correct_area(0.0, 120), (0.0, Correction::Unchanged));
}

#[test]
fn corrected_row_keeps_raw_totals() {
    let row = correct_group(group(7.0, 120));
    assert!((row.corrected_area - 0.7).abs() < 1e-12);
    assert_eq!(row.total_area_raw, 7.0);
    assert_eq!(row.total_supply, 10.0);
    assert_eq!(row.total_duration_seconds, 120);
    assert_eq!(row.correction, Correction::Scaled);
}

#[test]
fn correction_is_applied_row_by_row_in_order() {
    let rows = correct_groups(vec![group(5.0, 120), group(5.0, 0), group(50.0, 60)]);
    let corrections: Vec<Correction> = rows.iter().map(|row| row.correction).collect();
    assert_eq!(
        corrections,
        [Correction::Scaled, Correction::Unchanged, Correction::Unchanged]
    );
}
