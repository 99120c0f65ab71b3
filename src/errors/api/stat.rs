use crate::errors::api::ErrorResponse;
use crate::errors::internal::{GroupError, InternalError, QueryError, UserError};
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error responses for the fleet statistics endpoints
#[derive(ApiResponse, Debug)]
pub enum StatError {
    /// Query parameters are invalid
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Group filter references an unknown group
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Report is unavailable on the configured database backend
    #[oai(status = 501)]
    NotImplemented(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl StatError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        StatError::BadRequest(Json(ErrorResponse::new("bad_request", reason, 400)))
    }

    pub fn group_not_found(group_id: i32) -> Self {
        StatError::NotFound(Json(ErrorResponse::new(
            "group_not_found",
            format!("Group not found: {}", group_id),
            404,
        )))
    }

    pub fn unsupported_backend(operation: &str, backend: &str) -> Self {
        StatError::NotImplemented(Json(ErrorResponse::new(
            "unsupported_backend",
            format!("{} is not supported on {}", operation, backend),
            501,
        )))
    }

    /// Convert InternalError to StatError
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Group(GroupError::GroupIdNotFound { group_id }) => {
                Self::group_not_found(*group_id)
            }
            InternalError::Query(QueryError::UnsupportedBackend { operation, backend }) => {
                tracing::warn!("{} requested on unsupported backend {}", operation, backend);
                Self::unsupported_backend(operation, backend)
            }
            InternalError::Query(
                QueryError::MissingParameter { .. } | QueryError::EmptyList { .. },
            ) => Self::bad_request(err.to_string()),
            InternalError::User(UserError::InvalidGroupId { .. }) => {
                Self::bad_request(err.to_string())
            }
            _ => {
                tracing::error!("Unexpected error in stat operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        StatError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            StatError::BadRequest(json) => &json.0,
            StatError::NotFound(json) => &json.0,
            StatError::NotImplemented(json) => &json.0,
            StatError::InternalError(json) => &json.0,
        }
    }
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
