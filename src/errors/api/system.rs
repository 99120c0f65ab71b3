use crate::errors::api::ErrorResponse;
use crate::errors::internal::{EpsgError, GroupError, InternalError, UserError};
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error responses for the system management endpoints (users, groups, roles)
#[derive(ApiResponse, Debug)]
pub enum SystemError {
    /// Request failed validation
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Operation is not allowed on this record
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced record does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Record conflicts with an existing one
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl SystemError {
    pub fn user_not_found(user_id: i32) -> Self {
        SystemError::NotFound(Json(ErrorResponse::new(
            "user_not_found",
            format!("User not found: {}", user_id),
            404,
        )))
    }

    pub fn group_not_found(group_id: i32) -> Self {
        SystemError::NotFound(Json(ErrorResponse::new(
            "group_not_found",
            format!("Group not found: {}", group_id),
            404,
        )))
    }

    pub fn role_not_found(role_id: i32) -> Self {
        SystemError::NotFound(Json(ErrorResponse::new(
            "role_not_found",
            format!("Role not found: {}", role_id),
            404,
        )))
    }

    pub fn duplicate_login_name(login_name: &str) -> Self {
        SystemError::Conflict(Json(ErrorResponse::new(
            "duplicate_login_name",
            format!("Login name already exists: {}", login_name),
            409,
        )))
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        SystemError::BadRequest(Json(ErrorResponse::new("bad_request", reason, 400)))
    }

    pub fn super_admin_protected(action: &str) -> Self {
        SystemError::Forbidden(Json(ErrorResponse::new(
            "super_admin_protected",
            format!("The super administrator account cannot be {}", action),
            403,
        )))
    }

    /// Convert InternalError to SystemError
    ///
    /// Infrastructure failures are logged and reported as a generic 500.
    /// Domain errors map to their specific responses.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(_) => {
                tracing::error!("Database error in system operation: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::User(UserError::UserIdNotFound { user_id }) => {
                Self::user_not_found(*user_id)
            }
            InternalError::User(UserError::RoleIdNotFound { role_id }) => {
                Self::role_not_found(*role_id)
            }
            InternalError::User(UserError::DuplicateLoginName { login_name }) => {
                tracing::warn!("Duplicate login name rejected: {}", login_name);
                Self::duplicate_login_name(login_name)
            }
            InternalError::User(UserError::SuperAdminProtected { action }) => {
                tracing::warn!("Attempt to {} the super administrator", action);
                Self::super_admin_protected(action)
            }
            InternalError::User(
                UserError::MissingLoginName
                | UserError::InvalidField { .. }
                | UserError::InvalidStatus { .. }
                | UserError::InvalidGroupId { .. },
            ) => Self::bad_request(err.to_string()),

            InternalError::Group(GroupError::GroupIdNotFound { group_id }) => {
                Self::group_not_found(*group_id)
            }

            InternalError::Epsg(EpsgError::InvalidSchema { .. }) => {
                Self::bad_request(err.to_string())
            }

            InternalError::Query(_) => {
                tracing::error!("Unexpected query error in system operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        SystemError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.body().message.clone()
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            SystemError::BadRequest(json) => &json.0,
            SystemError::Forbidden(json) => &json.0,
            SystemError::NotFound(json) => &json.0,
            SystemError::Conflict(json) => &json.0,
            SystemError::InternalError(json) => &json.0,
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
