use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi};

use crate::api::ApiTags;
use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi;

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Returns the current status of the API service
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
