use thiserror::Error;

/// Failures while preparing or running native report SQL
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Named parameter '{name}' has no bound value")]
    MissingParameter { name: String },

    #[error("Empty parameter name at byte {position}")]
    EmptyParameterName { position: usize },

    #[error("List parameter '{name}' must not be empty")]
    EmptyList { name: String },

    #[error("{operation} is not supported on {backend}")]
    UnsupportedBackend { operation: String, backend: String },
}
