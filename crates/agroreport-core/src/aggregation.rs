// crates/agroreport-core/src/aggregation.rs

use std::collections::BTreeMap;

use agroreport_parser::schema::{
    FLIGHT_DURATION, FLIGHT_TIME, LOCATION, REQUIRED_COLUMNS, SPRAYED_AREA, TOTAL_AMOUNT,
};
use agroreport_parser::FlightTable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ReportError, Result};
use crate::time_codec::try_decode_duration;

const DATE_PREFIX_CHARS: usize = 10;

/// One drone flight as it appears in the log. Fields hold the raw cell text; nulls are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_timestamp: Option<String>,
    pub location: Option<String>,
    pub sprayed_area: Option<String>,
    pub flight_duration: Option<String>,
    pub total_amount: Option<String>,
}

/// A flight after coercion: everything the grouping step needs, nothing it can fail on.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFlight {
    pub date: String,
    pub location: String,
    pub sprayed_area: f64,
    pub total_amount: f64,
    pub duration_seconds: u64,
}

/// Per-group sums before the area heuristic runs.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightGroup {
    pub date: String,
    pub location: String,
    pub total_area_raw: f64,
    pub total_supply: f64,
    pub total_duration_seconds: u64,
    pub flight_count: u64,
}

/// Counts of cells that held text but could not be read, by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedCounts {
    pub flight_time: usize,
    pub sprayed_area: usize,
    pub flight_duration: usize,
    pub total_amount: usize,
    /// Records with at least one malformed field.
    pub affected_records: usize,
}

impl MalformedCounts {
    pub fn total(&self) -> usize {
        self.flight_time + self.sprayed_area + self.flight_duration + self.total_amount
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FieldIssues {
    flight_time: bool,
    sprayed_area: bool,
    flight_duration: bool,
    total_amount: bool,
}

impl FieldIssues {
    fn any(&self) -> bool {
        self.flight_time || self.sprayed_area || self.flight_duration || self.total_amount
    }
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub groups: Vec<FlightGroup>,
    pub record_count: usize,
    pub malformed: MalformedCounts,
}

/// Fails with [`ReportError::MissingColumn`] naming the first required column the log lacks.
pub fn ensure_required_columns(table: &FlightTable) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !table.metadata.has_column(column) {
            return Err(ReportError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

pub fn extract_records(table: &FlightTable) -> Result<Vec<FlightRecord>> {
    extract_records_limited(table, table.height())
}

/// Reads at most `limit` records from the top of the log.
pub fn extract_records_limited(table: &FlightTable, limit: usize) -> Result<Vec<FlightRecord>> {
    ensure_required_columns(table)?;

    let flight_time = table.text_column(FLIGHT_TIME)?;
    let location = table.text_column(LOCATION)?;
    let sprayed_area = table.text_column(SPRAYED_AREA)?;
    let flight_duration = table.text_column(FLIGHT_DURATION)?;
    let total_amount = table.text_column(TOTAL_AMOUNT)?;

    let len = table.height().min(limit);
    let mut records = Vec::with_capacity(len);
    for idx in 0..len {
        records.push(FlightRecord {
            flight_timestamp: flight_time.get(idx).map(str::to_string),
            location: location.get(idx).map(str::to_string),
            sprayed_area: sprayed_area.get(idx).map(str::to_string),
            flight_duration: flight_duration.get(idx).map(str::to_string),
            total_amount: total_amount.get(idx).map(str::to_string),
        });
    }
    Ok(records)
}

/// Work date of a flight: the first ten characters of its timestamp.
pub fn date_prefix(flight_timestamp: &str) -> String {
    flight_timestamp.chars().take(DATE_PREFIX_CHARS).collect()
}

/// Best-effort numeric read. `None` only when text was present and unreadable or not finite.
///
/// A single comma with no dot is read as a decimal separator (`2,5` is 2.5), as written by
/// locales that export semicolon-delimited logs.
fn coerce_number(raw: Option<&str>) -> Option<f64> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Some(0.0);
    };
    let parsed = match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) if text.matches(',').count() == 1 && !text.contains('.') => {
            text.replacen(',', ".", 1).parse::<f64>().ok()
        }
        Err(_) => None,
    };
    parsed.filter(|value| value.is_finite())
}

fn normalize_with_issues(record: &FlightRecord) -> (NormalizedFlight, FieldIssues) {
    let mut issues = FieldIssues::default();

    let timestamp = record.flight_timestamp.as_deref().unwrap_or_default();
    let date = date_prefix(timestamp);
    if !timestamp.is_empty() && NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        issues.flight_time = true;
    }

    let sprayed_area = coerce_number(record.sprayed_area.as_deref()).unwrap_or_else(|| {
        issues.sprayed_area = true;
        0.0
    });
    let total_amount = coerce_number(record.total_amount.as_deref()).unwrap_or_else(|| {
        issues.total_amount = true;
        0.0
    });

    let duration_seconds = match record.flight_duration.as_deref() {
        None => 0,
        Some(text) => try_decode_duration(text).unwrap_or_else(|| {
            issues.flight_duration = true;
            0
        }),
    };

    let flight = NormalizedFlight {
        date,
        location: record.location.clone().unwrap_or_default(),
        sprayed_area,
        total_amount,
        duration_seconds,
    };
    (flight, issues)
}

/// Coerces one record; malformed numbers and durations read as zero.
pub fn normalize_record(record: &FlightRecord) -> NormalizedFlight {
    normalize_with_issues(record).0
}

/// Groups flights by (date, location) and sums them. Groups come out sorted by that key.
pub fn aggregate_records(records: &[FlightRecord]) -> Aggregation {
    let mut malformed = MalformedCounts::default();
    let mut groups: BTreeMap<(String, String), FlightGroup> = BTreeMap::new();

    for record in records {
        let (flight, issues) = normalize_with_issues(record);
        if issues.any() {
            malformed.flight_time += usize::from(issues.flight_time);
            malformed.sprayed_area += usize::from(issues.sprayed_area);
            malformed.flight_duration += usize::from(issues.flight_duration);
            malformed.total_amount += usize::from(issues.total_amount);
            malformed.affected_records += 1;
        }

        let key = (flight.date.clone(), flight.location.clone());
        let group = groups.entry(key).or_insert_with(|| FlightGroup {
            date: flight.date,
            location: flight.location,
            total_area_raw: 0.0,
            total_supply: 0.0,
            total_duration_seconds: 0,
            flight_count: 0,
        });
        group.total_area_raw += flight.sprayed_area;
        group.total_supply += flight.total_amount;
        group.total_duration_seconds = group
            .total_duration_seconds
            .saturating_add(flight.duration_seconds);
        group.flight_count += 1;
    }

    if malformed.affected_records > 0 {
        warn!(
            affected_records = malformed.affected_records,
            flight_time = malformed.flight_time,
            sprayed_area = malformed.sprayed_area,
            flight_duration = malformed.flight_duration,
            total_amount = malformed.total_amount,
            "malformed values coerced to zero"
        );
    }

    let groups: Vec<FlightGroup> = groups.into_values().collect();
    for group in &groups {
        debug!(
            date = %group.date,
            location = %group.location,
            flights = group.flight_count,
            "aggregated work order"
        );
    }

    Aggregation {
        groups,
        record_count: records.len(),
        malformed,
    }
}

/// Reads and groups every record of a flight log.
pub fn aggregate_table(table: &FlightTable) -> Result<Aggregation> {
    let records = extract_records(table)?;
    Ok(aggregate_records(&records))
}
