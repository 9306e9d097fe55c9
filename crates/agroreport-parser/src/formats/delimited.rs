use crate::errors::ParserError;
use crate::model::{FlightTable, TableMetadata};
use crate::registry::FlightLogParser;

use super::common::{parse_header, TextColumns};

pub struct CommaDelimitedParser;
/// Semicolon exports usually come from locales that write decimal commas (`2,5`). Cells are
/// kept as text here; numeric reading accepts either separator.
pub struct SemicolonDelimitedParser;
pub struct TabDelimitedParser;

impl CommaDelimitedParser {
    const NAME: &'static str = "CSV_COMMA";
}

impl SemicolonDelimitedParser {
    const NAME: &'static str = "CSV_SEMICOLON";
}

impl TabDelimitedParser {
    const NAME: &'static str = "TSV";
}

impl FlightLogParser for CommaDelimitedParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn delimiter(&self) -> u8 {
        b','
    }

    fn parse(&self, content: &str) -> Result<FlightTable, ParserError> {
        parse_delimited(Self::NAME, self.delimiter(), content)
    }
}

impl FlightLogParser for SemicolonDelimitedParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn delimiter(&self) -> u8 {
        b';'
    }

    fn parse(&self, content: &str) -> Result<FlightTable, ParserError> {
        parse_delimited(Self::NAME, self.delimiter(), content)
    }
}

impl FlightLogParser for TabDelimitedParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn delimiter(&self) -> u8 {
        b'\t'
    }

    fn parse(&self, content: &str) -> Result<FlightTable, ParserError> {
        parse_delimited(Self::NAME, self.delimiter(), content)
    }
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter);
    builder
}

fn parse_delimited(
    parser: &'static str,
    delimiter: u8,
    content: &str,
) -> Result<FlightTable, ParserError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = reader_builder(delimiter).from_reader(content.as_bytes());
    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(ParserError::FormatMismatch {
            parser,
            reason: "log missing header row".to_string(),
        })?
        .map_err(|source| ParserError::Csv { parser, source })?;

    if header.len() < 2 {
        return Err(ParserError::FormatMismatch {
            parser,
            reason: format!(
                "delimiter {:?} did not split the header row",
                char::from(delimiter)
            ),
        });
    }

    let mut columns = TextColumns::new(parse_header(parser, &header)?);

    for (offset, record) in records.enumerate() {
        let record = record.map_err(|source| ParserError::Csv { parser, source })?;
        let line_index = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(offset + 2);
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        columns.push_row(parser, &record, line_index)?;
    }

    let names = columns.names().to_vec();
    let row_count = columns.row_count();
    let df = columns.into_frame(parser)?;

    Ok(FlightTable {
        metadata: TableMetadata::new(parser, names, row_count),
        df,
    })
}
