// crates/agroreport-core/src/correction.rs

//! Area correction for a known logging defect.
//!
//! Some aircraft firmware records sprayed area one order of magnitude too high. The defect is
//! detected heuristically: when the implied coverage rate of a work order falls strictly
//! between 1 and 10 hectares per minute, the area is divided by ten. This is not a guaranteed
//! fix. A genuine order in the band is scaled too, and a defective one outside it is not.
//! Orders with no recorded flight time are never touched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregation::FlightGroup;

const SUSPICIOUS_RATE_MIN_HA_PER_MIN: f64 = 1.0;
const SUSPICIOUS_RATE_MAX_HA_PER_MIN: f64 = 10.0;
const CORRECTION_FACTOR: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Correction {
    Unchanged,
    Scaled,
}

/// One work order: a (date, location) group with its corrected area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub date: String,
    pub location: String,
    pub total_area_raw: f64,
    pub total_supply: f64,
    pub total_duration_seconds: u64,
    pub flight_count: u64,
    pub corrected_area: f64,
    pub correction: Correction,
}

/// Returns the area to report and whether the heuristic fired.
pub fn correct_area(total_area_raw: f64, total_duration_seconds: u64) -> (f64, Correction) {
    let minutes = total_duration_seconds as f64 / 60.0;
    if minutes <= 0.0 {
        return (total_area_raw, Correction::Unchanged);
    }

    let rate = total_area_raw / minutes;
    if rate > SUSPICIOUS_RATE_MIN_HA_PER_MIN && rate < SUSPICIOUS_RATE_MAX_HA_PER_MIN {
        (total_area_raw / CORRECTION_FACTOR, Correction::Scaled)
    } else {
        (total_area_raw, Correction::Unchanged)
    }
}

pub fn correct_group(group: FlightGroup) -> AggregatedRow {
    let (corrected_area, correction) =
        correct_area(group.total_area_raw, group.total_duration_seconds);
    AggregatedRow {
        date: group.date,
        location: group.location,
        total_area_raw: group.total_area_raw,
        total_supply: group.total_supply,
        total_duration_seconds: group.total_duration_seconds,
        flight_count: group.flight_count,
        corrected_area,
        correction,
    }
}

pub fn correct_groups(groups: Vec<FlightGroup>) -> Vec<AggregatedRow> {
    let rows: Vec<AggregatedRow> = groups.into_iter().map(correct_group).collect();
    let scaled = rows
        .iter()
        .filter(|row| row.correction == Correction::Scaled)
        .count();
    if scaled > 0 {
        info!(scaled, total = rows.len(), "area correction applied");
    }
    rows
}
