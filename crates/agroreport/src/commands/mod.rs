// crates/agroreport/src/commands/mod.rs

pub mod generate;
pub mod preview;

use std::path::Path;

use agroreport_core::ReportConfig;
use agroreport_parser::{parse_flight_log, FlightTable};
use anyhow::{Context, Result};
use tracing::info;

/// Settings file, then environment. Flags are applied by each command.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let config = match path {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ReportConfig::default(),
    };
    config
        .with_env_overrides()
        .context("invalid environment override")
}

/// Reads and parses a flight log. Bytes that are not UTF-8 are replaced rather than rejected.
pub fn read_flight_log(path: &Path) -> Result<FlightTable> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read flight log {}", path.display()))?;
    let content = String::from_utf8_lossy(&raw);
    let table = parse_flight_log(&content)
        .with_context(|| format!("could not read {} as a flight log", path.display()))?;
    info!(
        path = %path.display(),
        format = %table.metadata.file_format,
        rows = table.metadata.row_count,
        "flight log loaded"
    );
    Ok(table)
}
