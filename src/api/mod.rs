// API layer - HTTP endpoints
pub mod health;
pub mod helpers;
pub mod stat;
pub mod user;

use std::sync::Arc;

use poem::Route;
use poem_openapi::{OpenApiService, Tags};

use crate::app_data::AppData;
use crate::services::{StatService, UserService};

pub use health::HealthApi;
pub use stat::StatApi;
pub use user::UserApi;

/// API tags shared by every endpoint group
#[derive(Tags)]
pub enum ApiTags {
    /// Health check endpoints
    Health,
    /// User administration
    User,
    /// Fleet statistics
    Stat,
}

/// Assemble the OpenAPI service for all endpoint groups
pub fn api_service(app_data: Arc<AppData>) -> OpenApiService<(HealthApi, UserApi, StatApi), ()> {
    let default_page_size = app_data.settings.default_page_size();
    let user_api = UserApi::new(Arc::new(UserService::new(app_data.clone())), default_page_size);
    let stat_api = StatApi::new(Arc::new(StatService::new(app_data)), default_page_size);

    OpenApiService::new((HealthApi, user_api, stat_api), "Fleetdesk API", env!("CARGO_PKG_VERSION"))
}

/// Compose routes: API service under /api and Swagger UI under /swagger
pub fn routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let api_service = api_service(app_data).server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
