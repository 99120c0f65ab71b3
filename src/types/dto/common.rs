use poem_openapi::Object;

pub const ACTION_SUCCESS_MESSAGE: &str = "Operation succeeded";

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Uniform result envelope for mutating endpoints
#[derive(Object, Debug, Clone, PartialEq)]
pub struct WebMessage {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable result
    pub message: String,
}

impl WebMessage {
    pub fn ok() -> Self {
        Self::ok_with(ACTION_SUCCESS_MESSAGE)
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Value/label pair for enum pickers
#[derive(Object, Debug, Clone, PartialEq)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}
