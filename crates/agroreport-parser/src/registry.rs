use std::cmp::Reverse;

use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{CommaDelimitedParser, SemicolonDelimitedParser, TabDelimitedParser};
use crate::model::FlightTable;

pub trait FlightLogParser {
    fn name(&self) -> &'static str;
    /// Field separator this parser splits on.
    fn delimiter(&self) -> u8;
    fn parse(&self, content: &str) -> Result<FlightTable, ParserError>;
}

/// Delimited formats a flight log may arrive in, in fallback order.
pub fn default_parsers() -> [&'static dyn FlightLogParser; 3] {
    [
        &CommaDelimitedParser,
        &SemicolonDelimitedParser,
        &TabDelimitedParser,
    ]
}

/// First non-blank line, without a byte-order mark.
fn header_line(content: &str) -> &str {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
}

/// Reads a flight log in whichever delimited format it uses.
///
/// Parsers are tried by how often their delimiter occurs in the header row, so a semicolon
/// export whose column names contain commas is not split on the commas. Ties keep the
/// fallback order of [`default_parsers`].
pub fn parse_flight_log(content: &str) -> Result<FlightTable, ParserError> {
    let header = header_line(content);
    let mut parsers = default_parsers();
    parsers.sort_by_key(|parser| {
        Reverse(
            header
                .bytes()
                .filter(|byte| *byte == parser.delimiter())
                .count(),
        )
    });
    parse_with_parsers(content, &parsers)
}

pub fn parse_with_parsers(
    content: &str,
    parsers: &[&dyn FlightLogParser],
) -> Result<FlightTable, ParserError> {
    if content.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(ParserError::EmptyInput);
    }

    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(content) {
            Ok(parsed) => return Ok(parsed),
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser { attempts })
}
