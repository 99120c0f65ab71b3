use thiserror::Error;

pub mod database;
pub mod epsg;
pub mod group;
pub mod query;
pub mod user;

pub use database::DatabaseError;
pub use epsg::EpsgError;
pub use group::GroupError;
pub use query::QueryError;
pub use user::UserError;

/// Internal error type for store and service operations
/// 
/// Infrastructure errors (database, parse, crypto) are shared; domain errors are
/// grouped per module. Not exposed via API - endpoints must convert to SystemError
/// or StatError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },
    
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },
    
    #[error(transparent)]
    User(#[from] UserError),
    
    #[error(transparent)]
    Group(#[from] GroupError),
    
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Epsg(#[from] EpsgError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation { operation: operation.to_string(), source })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
