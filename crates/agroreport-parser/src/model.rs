use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Name of the parser that recognized the log.
    pub file_format: String,
    /// Header names after normalization, in file order.
    pub columns: Vec<String>,
    pub row_count: usize,
}

impl TableMetadata {
    pub fn new(file_format: impl Into<String>, columns: Vec<String>, row_count: usize) -> Self {
        Self {
            file_format: file_format.into(),
            columns,
            row_count,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }
}

/// Raw flight log: one nullable string column per header, one row per flight.
#[derive(Debug, Clone)]
pub struct FlightTable {
    pub metadata: TableMetadata,
    pub df: DataFrame,
}

impl FlightTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn text_column(&self, name: &str) -> PolarsResult<&StringChunked> {
        self.df.column(name)?.str()
    }
}
