// EPSG registry support
pub mod ansi_dialect;

pub use ansi_dialect::{AnsiDialect, DEFAULT_PREFIX};
