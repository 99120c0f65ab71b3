// API request/response models
pub mod common;
pub mod stat;
pub mod user;
