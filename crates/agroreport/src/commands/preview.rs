// crates/agroreport/src/commands/preview.rs

use std::path::PathBuf;

use agroreport_core::pipeline::build_work_orders;
use agroreport_core::preview_rows;
use agroreport_core::time_codec::encode_duration;
use agroreport_parser::REQUIRED_COLUMNS;
use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use super::read_flight_log;

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// Flight log exported from the drone fleet software (CSV or TSV)
    pub input: PathBuf,
    /// Number of raw rows to show
    #[arg(short, long, default_value_t = 5)]
    pub rows: usize,
}

pub fn handle_preview(args: PreviewArgs) -> Result<()> {
    let table = read_flight_log(&args.input)?;
    println!(
        "{}: {} rows, format {}",
        args.input.display(),
        table.metadata.row_count,
        table.metadata.file_format
    );

    let mut raw = Table::new();
    raw.load_preset(UTF8_FULL).set_header(REQUIRED_COLUMNS.to_vec());
    for record in preview_rows(&table, args.rows)? {
        raw.add_row(vec![
            record.flight_timestamp.unwrap_or_default(),
            record.location.unwrap_or_default(),
            record.sprayed_area.unwrap_or_default(),
            record.flight_duration.unwrap_or_default(),
            record.total_amount.unwrap_or_default(),
        ]);
    }
    println!("{raw}");

    let orders = build_work_orders(&table)?;
    let mut summary = Table::new();
    summary.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        "Location",
        "Area (ha)",
        "Corrected",
        "Supply (L/Kg)",
        "Operating time",
        "Flights",
    ]);
    for row in &orders.rows {
        summary.add_row(vec![
            row.date.clone(),
            row.location.clone(),
            format!("{:.2}", row.corrected_area),
            format!("{:?}", row.correction),
            format!("{:.2}", row.total_supply),
            encode_duration(row.total_duration_seconds),
            row.flight_count.to_string(),
        ]);
    }
    println!("{summary}");
    println!("{} work orders", orders.rows.len());
    Ok(())
}
