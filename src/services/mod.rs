// Services layer - Business logic and orchestration
pub mod named_query;
pub mod password_hasher;
pub mod stat_service;
pub mod user_service;

pub use named_query::NamedQuery;
pub use password_hasher::{HashedPassword, PasswordHasher};
pub use stat_service::StatService;
pub use user_service::UserService;
