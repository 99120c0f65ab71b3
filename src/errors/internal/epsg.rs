use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EpsgError {
    #[error("Invalid EPSG schema name: '{schema}'")]
    InvalidSchema { schema: String },
}
