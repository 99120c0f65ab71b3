#[cfg(test)]
mod tests {
    use crate::errors::SystemError;
    use crate::errors::internal::{EpsgError, GroupError, InternalError, UserError};
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let internal_err = InternalError::database("find_user", DbErr::Custom("boom".to_string()));
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "An internal error occurred");
    }

    #[test]
    fn test_crypto_error_hides_details() {
        let err = SystemError::from_internal_error(InternalError::crypto("password_hash", "bad pepper"));

        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("pepper"));
    }

    #[test]
    fn test_user_not_found_converts_correctly() {
        let internal_err = InternalError::User(UserError::UserIdNotFound { user_id: 42 });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found: 42");
    }

    #[test]
    fn test_duplicate_login_name_is_conflict() {
        let internal_err = InternalError::User(UserError::DuplicateLoginName {
            login_name: "alice".to_string(),
        });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 409);
        assert!(matches!(err, SystemError::Conflict(_)));
    }

    #[test]
    fn test_super_admin_protected_is_forbidden() {
        let internal_err = InternalError::User(UserError::SuperAdminProtected {
            action: "deleted".to_string(),
        });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 403);
        assert!(err.message().contains("deleted"));
    }

    #[test]
    fn test_invalid_status_is_bad_request() {
        let internal_err = InternalError::User(UserError::InvalidStatus { value: "MAYBE".to_string() });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("MAYBE"));
    }

    #[test]
    fn test_invalid_field_is_bad_request() {
        let internal_err = InternalError::User(UserError::InvalidField {
            field: "loginName".to_string(),
            reason: "must be at most 20 characters".to_string(),
        });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid loginName: must be at most 20 characters");
    }

    #[test]
    fn test_group_not_found_converts_correctly() {
        let internal_err = InternalError::Group(GroupError::GroupIdNotFound { group_id: 7 });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Group not found: 7");
    }

    #[test]
    fn test_invalid_schema_is_bad_request() {
        let internal_err = InternalError::Epsg(EpsgError::InvalidSchema { schema: "  ".to_string() });
        let err = SystemError::from_internal_error(internal_err);

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_display_uses_message() {
        let err = SystemError::user_not_found(3);
        assert_eq!(err.to_string(), "User not found: 3");
    }
}
