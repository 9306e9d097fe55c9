// crates/agroreport/src/commands/generate.rs

use std::path::PathBuf;

use agroreport_core::archive::DEFAULT_ARCHIVE_NAME;
use agroreport_core::error::bytes_to_mb;
use agroreport_core::{generate_reports, ReportConfig, ReportError};
use anyhow::{bail, Context, Result};
use tracing::warn;

use super::read_flight_log;

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Flight log exported from the drone fleet software (CSV or TSV)
    pub input: PathBuf,
    /// Where to write the ZIP archive
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_NAME)]
    pub output: PathBuf,
    /// Organization name printed on every work order
    #[arg(long)]
    pub organization: Option<String>,
    /// Largest archive, in bytes, that will be written
    #[arg(long)]
    pub max_archive_bytes: Option<u64>,
    /// Also write the run summary as JSON to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn handle_generate(args: GenerateArgs, mut config: ReportConfig) -> Result<()> {
    if let Some(organization) = args.organization {
        config.organization = organization;
    }
    if let Some(limit) = args.max_archive_bytes {
        config.max_archive_bytes = limit;
    }

    let table = read_flight_log(&args.input)?;
    let bundle = generate_reports(&table, &config)?;
    let summary = &bundle.summary;

    if summary.malformed.total() > 0 {
        warn!(
            affected_records = summary.malformed.affected_records,
            "some cells could not be read and were counted as zero"
        );
    }

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    let archive = match bundle.deliver(config.max_archive_bytes) {
        Ok(archive) => archive,
        Err(ReportError::OversizeArchive {
            actual_bytes,
            limit_bytes,
        }) => bail!(
            "archive is {:.2} MB, over the {:.2} MB limit; nothing was written",
            bytes_to_mb(actual_bytes),
            bytes_to_mb(limit_bytes)
        ),
        Err(err) => return Err(err.into()),
    };

    std::fs::write(&args.output, archive)
        .with_context(|| format!("failed to write archive to {}", args.output.display()))?;

    println!(
        "Generated {} work orders ({} area-corrected) from {} flights.",
        summary.work_order_count, summary.corrected_work_orders, summary.record_count
    );
    println!(
        "Archive size: {:.2} MB, written to {}",
        summary.archive_mb(),
        args.output.display()
    );
    Ok(())
}
