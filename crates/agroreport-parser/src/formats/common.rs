use std::collections::HashSet;

use csv::StringRecord;
use polars::prelude::*;

use crate::errors::ParserError;
use crate::schema::normalize_column_name;

/// Column-major buffers for a text table, filled one row at a time.
#[derive(Debug, Clone)]
pub(crate) struct TextColumns {
    names: Vec<String>,
    values: Vec<Vec<Option<String>>>,
}

impl TextColumns {
    pub fn new(names: Vec<String>) -> Self {
        let values = names.iter().map(|_| Vec::new()).collect();
        Self { names, values }
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn push_row(
        &mut self,
        parser: &'static str,
        record: &StringRecord,
        line_index: usize,
    ) -> Result<(), ParserError> {
        if record.len() != self.width() {
            return Err(ParserError::DataRow {
                parser,
                line_index,
                message: format!(
                    "expected {} fields, found {}",
                    self.width(),
                    record.len()
                ),
            });
        }

        for (column, field) in self.values.iter_mut().zip(record.iter()) {
            column.push(clean_optional(Some(field)));
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.values.first().map(Vec::len).unwrap_or(0)
    }

    pub fn into_frame(self, parser: &'static str) -> Result<DataFrame, ParserError> {
        let columns: Vec<Column> = self
            .names
            .iter()
            .zip(self.values.iter())
            .map(|(name, values)| {
                let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
                Series::new(name.as_str().into(), utf8).into()
            })
            .collect();

        DataFrame::new(columns).map_err(|source| ParserError::Frame { parser, source })
    }
}

/// Normalizes the header row and rejects repeated column names.
///
/// Blank header cells (spreadsheet exports often end rows with a stray delimiter) are named
/// `unnamed_<position>` so the column still lines up with its data.
pub(crate) fn parse_header(
    parser: &'static str,
    header: &StringRecord,
) -> Result<Vec<String>, ParserError> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(header.len());

    for (idx, raw) in header.iter().enumerate() {
        let name = match normalize_column_name(raw) {
            "" => format!("unnamed_{}", idx + 1),
            other => other.to_string(),
        };
        if !seen.insert(name.clone()) {
            return Err(ParserError::InvalidHeader {
                parser,
                message: format!("column '{name}' appears more than once"),
            });
        }
        names.push(name);
    }

    Ok(names)
}

pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
