// crates/agroreport-core/src/error.rs

use agroreport_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Flight log could not be read: {0}")]
    Parser(#[from] ParserError),

    #[error("Flight log is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error("ZIP operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Archive is {actual_bytes} bytes ({:.2} MB), above the {limit_bytes} byte limit ({:.2} MB)",
        bytes_to_mb(*.actual_bytes),
        bytes_to_mb(*.limit_bytes)
    )]
    OversizeArchive { actual_bytes: u64, limit_bytes: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Size in binary megabytes, the unit the delivery limit is quoted in.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
