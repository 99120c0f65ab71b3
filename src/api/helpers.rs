use poem_openapi::payload::Json;

use crate::errors::{InternalError, StatError, SystemError};
use crate::types::dto::common::WebMessage;
use crate::types::internal::{DateRange, PageRequest};

/// Wrap the outcome of a mutating user operation in the uniform envelope
///
/// Failures are logged; infrastructure errors only expose a generic message.
pub fn web_message<T>(operation: &str, result: Result<T, InternalError>) -> Json<WebMessage> {
    match result {
        Ok(_) => Json(WebMessage::ok()),
        Err(err) => {
            tracing::error!("{} failed: {}", operation, err);
            Json(WebMessage::fail(SystemError::from_internal_error(err).message()))
        }
    }
}

/// Parse the `startDay`/`endDay` query values of a statistics request
///
/// Blank values fall back to the default bounds.
pub fn parse_range(start_day: Option<&str>, end_day: Option<&str>) -> Result<DateRange, StatError> {
    DateRange::from_days(start_day, end_day).map_err(|e| {
        tracing::debug!("Rejected date range: {}", e);
        StatError::bad_request(e.to_string())
    })
}

pub fn page_request(page: Option<u64>, size: Option<u64>, default_size: u64) -> PageRequest {
    PageRequest::new(page, size, default_size)
}
