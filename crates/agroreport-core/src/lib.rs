pub mod aggregation;
pub mod archive;
pub mod config;
pub mod correction;
pub mod document;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod pipeline;
pub mod render;
pub mod time_codec;

pub use config::ReportConfig;
pub use correction::AggregatedRow;
pub use error::{ReportError, Result};
pub use pipeline::{
    generate_reports, generate_reports_from_text, preview_rows, ReportBundle, RunSummary,
};
