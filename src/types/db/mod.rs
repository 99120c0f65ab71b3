// Database entities - SeaORM models
pub mod bus;
pub mod bus_break_down_log;
pub mod bus_fire_log;
pub mod bus_model;
pub mod bus_on_off_log;
pub mod enums;
pub mod group;
pub mod group_role;
pub mod role;
pub mod user;
pub mod user_role;

pub use enums::{Sex, Status};
