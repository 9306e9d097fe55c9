/// Column carrying the flight start timestamp; its first ten characters are the work date.
pub const FLIGHT_TIME: &str = "Flight time";
pub const LOCATION: &str = "Location";
pub const SPRAYED_AREA: &str = "Sprayed area";
pub const FLIGHT_DURATION: &str = "Flight duration(min:sec)";
pub const TOTAL_AMOUNT: &str = "Total Amount(L/Kg)";

/// Columns every flight log must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    FLIGHT_TIME,
    LOCATION,
    SPRAYED_AREA,
    FLIGHT_DURATION,
    TOTAL_AMOUNT,
];

/// Trims incidental whitespace and a leading byte-order mark from a header cell.
pub fn normalize_column_name(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}
