// API-facing error types
pub mod stat;
pub mod system;

pub use stat::StatError;
pub use system::SystemError;

use poem_openapi::Object;

/// Standardized error body shared by every endpoint group
#[derive(Object, Debug, Clone)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorResponse {
    pub(crate) fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}

#[cfg(test)]
mod system_test;
