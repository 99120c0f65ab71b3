// Stores layer - Data access
pub mod group_store;
pub mod role_store;
pub mod telemetry_store;
pub mod user_store;

pub use group_store::GroupStore;
pub use role_store::RoleStore;
pub use telemetry_store::{LogFilter, LogPageResult, TelemetryLog, TelemetryStore};
pub use user_store::{UserFilter, UserPageResult, UserStore};
