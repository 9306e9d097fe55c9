//! Conversions between flight-log durations (`M:SS`) and report durations (`HH:MM:SS`).

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Parses `M:SS` / `MM:SS` into seconds, or `None` when the text is not two integer fields.
pub fn try_decode_duration(text: &str) -> Option<u64> {
    let mut parts = text.split(':');
    let minutes = parts.next()?.trim().parse::<u64>().ok()?;
    let seconds = parts.next()?.trim().parse::<u64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    minutes
        .checked_mul(SECONDS_PER_MINUTE)?
        .checked_add(seconds)
}

/// Lenient form of [`try_decode_duration`]: malformed durations count as zero seconds.
pub fn decode_duration(text: &str) -> u64 {
    try_decode_duration(text).unwrap_or(0)
}

/// Formats seconds as `HH:MM:SS`. Hours are never truncated and may exceed two digits.
pub fn encode_duration(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
