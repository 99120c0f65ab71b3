use thiserror::Error;

/// Failures while loading startup configuration
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError { setting_name: String, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_display() {
        let err = ApplicationError::InvalidSetting {
            setting_name: "PORT".to_string(),
            reason: "Port 0 is outside valid range 1-65535".to_string(),
        };

        assert_eq!(err.to_string(), "Invalid setting 'PORT': Port 0 is outside valid range 1-65535");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ApplicationError::ParseError {
            setting_name: "DEFAULT_PAGE_SIZE".to_string(),
            error: "Expected integer".to_string(),
        };

        assert!(err.to_string().contains("DEFAULT_PAGE_SIZE"));
    }
}
