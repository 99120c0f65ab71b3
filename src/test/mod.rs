// Test utilities shared by unit tests
pub mod utils;
