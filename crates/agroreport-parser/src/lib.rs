pub mod errors;
pub mod formats;
pub mod model;
mod registry;
pub mod schema;

pub use errors::{ParserAttempt, ParserError};
pub use model::{FlightTable, TableMetadata};
pub use registry::{default_parsers, parse_flight_log, parse_with_parsers, FlightLogParser};
pub use schema::REQUIRED_COLUMNS;
