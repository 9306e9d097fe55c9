// crates/agroreport-core/src/pipeline.rs

//! End-to-end run: flight log -> work orders -> documents -> archive.

use agroreport_parser::{parse_flight_log, FlightTable};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregation::{aggregate_table, extract_records_limited, FlightRecord, MalformedCounts};
use crate::archive::{ensure_within_limit, package_documents, PackagedArchive, RenderedDocument};
use crate::config::ReportConfig;
use crate::correction::{correct_groups, AggregatedRow, Correction};
use crate::document::assemble_document;
use crate::error::{bytes_to_mb, Result};
use crate::metrics::{HelveticaMetrics, TextMeasure};
use crate::render::render_pdf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_format: String,
    pub record_count: usize,
    pub work_order_count: usize,
    pub corrected_work_orders: usize,
    pub malformed: MalformedCounts,
    pub documents: Vec<String>,
    pub archive_bytes: u64,
}

impl RunSummary {
    pub fn archive_mb(&self) -> f64 {
        bytes_to_mb(self.archive_bytes)
    }
}

/// Everything a run produced. The archive is only handed out through [`ReportBundle::deliver`].
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub rows: Vec<AggregatedRow>,
    pub summary: RunSummary,
    archive: PackagedArchive,
}

impl ReportBundle {
    pub fn archive_size(&self) -> u64 {
        self.archive.size_bytes()
    }

    pub fn entries(&self) -> &[String] {
        &self.archive.entries
    }

    /// Archive bytes, unless they exceed `limit_bytes`.
    pub fn deliver(&self, limit_bytes: u64) -> Result<&[u8]> {
        ensure_within_limit(self.archive.size_bytes(), limit_bytes)?;
        Ok(&self.archive.bytes)
    }
}

#[derive(Debug, Clone)]
pub struct WorkOrders {
    pub rows: Vec<AggregatedRow>,
    pub record_count: usize,
    pub malformed: MalformedCounts,
}

/// Aggregates and corrects a flight log into work orders, without rendering anything.
pub fn build_work_orders(table: &FlightTable) -> Result<WorkOrders> {
    let aggregation = aggregate_table(table)?;
    Ok(WorkOrders {
        rows: correct_groups(aggregation.groups),
        record_count: aggregation.record_count,
        malformed: aggregation.malformed,
    })
}

/// Lays out and renders one PDF per work order, keeping row order.
pub fn render_documents(
    rows: &[AggregatedRow],
    config: &ReportConfig,
    measure: &dyn TextMeasure,
) -> Result<Vec<RenderedDocument>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let document = assemble_document(row, index, config, measure);
            let bytes = render_pdf(&document)?;
            Ok(RenderedDocument {
                name: document.name,
                bytes,
            })
        })
        .collect()
}

pub fn generate_reports(table: &FlightTable, config: &ReportConfig) -> Result<ReportBundle> {
    let WorkOrders {
        rows,
        record_count,
        malformed,
    } = build_work_orders(table)?;
    let documents = render_documents(&rows, config, &HelveticaMetrics)?;
    let archive = package_documents(documents)?;

    let summary = RunSummary {
        input_format: table.metadata.file_format.clone(),
        record_count,
        work_order_count: rows.len(),
        corrected_work_orders: rows
            .iter()
            .filter(|row| row.correction == Correction::Scaled)
            .count(),
        malformed,
        documents: archive.entries.clone(),
        archive_bytes: archive.size_bytes(),
    };
    info!(
        records = summary.record_count,
        work_orders = summary.work_order_count,
        corrected = summary.corrected_work_orders,
        archive_bytes = summary.archive_bytes,
        "reports generated"
    );

    Ok(ReportBundle {
        rows,
        summary,
        archive,
    })
}

/// Parses a flight log from text and runs [`generate_reports`] on it.
pub fn generate_reports_from_text(content: &str, config: &ReportConfig) -> Result<ReportBundle> {
    let table = parse_flight_log(content)?;
    generate_reports(&table, config)
}

/// The first `rows` records of the log, as read, for a quick look before generating.
pub fn preview_rows(table: &FlightTable, rows: usize) -> Result<Vec<FlightRecord>> {
    extract_records_limited(table, rows)
}
