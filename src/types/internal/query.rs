use crate::types::internal::DateRange;

pub const MAX_PAGE_SIZE: u64 = 500;

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Missing size falls back to `default_size`; sizes are clamped to 1..=500
    pub fn new(page: Option<u64>, size: Option<u64>, default_size: u64) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Filters for the user list
///
/// `status` and `group_id` arrive as raw query-string text and are coerced
/// by the service.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub status: Option<String>,
    pub group_id: Option<String>,
    pub login_name: Option<String>,
}

/// Filters for paged telemetry log listings
#[derive(Debug, Clone)]
pub struct LogQuery {
    pub vin: Option<String>,
    pub group_id: Option<i32>,
    pub range: DateRange,
}
