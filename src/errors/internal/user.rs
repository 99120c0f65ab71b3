use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Login name already exists: {login_name}")]
    DuplicateLoginName { login_name: String },

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: i32 },

    #[error("Login name is required")]
    MissingLoginName,

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid status value: {value}")]
    InvalidStatus { value: String },

    #[error("Invalid group id: {value}")]
    InvalidGroupId { value: String },

    #[error("Role ID not found: {role_id}")]
    RoleIdNotFound { role_id: i32 },

    #[error("The super administrator account cannot be {action}")]
    SuperAdminProtected { action: String },
}
