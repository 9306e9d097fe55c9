mod common;
mod delimited;

pub use delimited::{CommaDelimitedParser, SemicolonDelimitedParser, TabDelimitedParser};
