use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::api::helpers::{page_request, parse_range};
use crate::api::ApiTags;
use crate::errors::StatError;
use crate::services::StatService;
use crate::types::dto::stat::{
    BreakDownLogPage, BreakDownLogView, DailyCountView, FireLogPage, FireLogView, OnOffLogPage,
    OnOffLogView, SensorReadingView,
};
use crate::types::internal::LogQuery;

/// Fleet statistics endpoints
///
/// Days are `YYYY-MM-DD`; a missing start means 1970-01-01 and a missing end
/// means today.
pub struct StatApi {
    stat_service: Arc<StatService>,
    default_page_size: u64,
}

impl StatApi {
    pub fn new(stat_service: Arc<StatService>, default_page_size: u64) -> Self {
        Self {
            stat_service,
            default_page_size,
        }
    }

    fn log_query(
        vin: Option<String>,
        group_id: Option<i32>,
        start_day: Option<&str>,
        end_day: Option<&str>,
    ) -> Result<LogQuery, StatError> {
        Ok(LogQuery {
            vin,
            group_id,
            range: parse_range(start_day, end_day)?,
        })
    }
}

#[OpenApi(prefix_path = "/vsail/stat")]
impl StatApi {
    /// Daily fire counts per bus model
    #[oai(path = "/fire/by-model", method = "get", tag = "ApiTags::Stat")]
    async fn fire_by_model(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .fire_count_by_bus_model(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Daily fire counts per route group
    #[oai(path = "/fire/by-group", method = "get", tag = "ApiTags::Stat")]
    async fn fire_by_group(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .fire_count_by_group(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Daily fire counts
    #[oai(path = "/fire", method = "get", tag = "ApiTags::Stat")]
    async fn fire(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .fire_count(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Daily breakdown counts per bus model
    #[oai(path = "/break-down/by-model", method = "get", tag = "ApiTags::Stat")]
    async fn break_down_by_model(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .break_down_count_by_bus_model(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Daily breakdown counts per route group
    #[oai(path = "/break-down/by-group", method = "get", tag = "ApiTags::Stat")]
    async fn break_down_by_group(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .break_down_count_by_group(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Daily breakdown counts
    #[oai(path = "/break-down", method = "get", tag = "ApiTags::Stat")]
    async fn break_down(
        &self,
        #[oai(name = "rootGroupId")] root_group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<DailyCountView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .break_down_count(root_group_id.0, range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Page of on/off events, newest first
    #[oai(path = "/on-off/page", method = "get", tag = "ApiTags::Stat")]
    async fn on_off_page(
        &self,
        vin: Query<Option<String>>,
        #[oai(name = "groupId")] group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<OnOffLogPage>, StatError> {
        let query = Self::log_query(vin.0, group_id.0, start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .find_on_off_page(&query, page_request(page.0, size.0, self.default_page_size))
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Page of fire events, newest first
    #[oai(path = "/fire/page", method = "get", tag = "ApiTags::Stat")]
    async fn fire_page(
        &self,
        vin: Query<Option<String>>,
        #[oai(name = "groupId")] group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<FireLogPage>, StatError> {
        let query = Self::log_query(vin.0, group_id.0, start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .find_fire_page(&query, page_request(page.0, size.0, self.default_page_size))
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Page of breakdown events, newest first
    #[oai(path = "/break-down/page", method = "get", tag = "ApiTags::Stat")]
    async fn break_down_page(
        &self,
        vin: Query<Option<String>>,
        #[oai(name = "groupId")] group_id: Query<Option<i32>>,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<BreakDownLogPage>, StatError> {
        let query = Self::log_query(vin.0, group_id.0, start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .find_break_down_page(&query, page_request(page.0, size.0, self.default_page_size))
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// All on/off events in the range, oldest first
    #[oai(path = "/on-off/log", method = "get", tag = "ApiTags::Stat")]
    async fn on_off_log(
        &self,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<OnOffLogView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .query_on_off_log(range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// All fire events in the range, oldest first
    #[oai(path = "/fire/log", method = "get", tag = "ApiTags::Stat")]
    async fn fire_log(
        &self,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<FireLogView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .query_fire_log(range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// All breakdown events in the range, oldest first
    #[oai(path = "/break-down/log", method = "get", tag = "ApiTags::Stat")]
    async fn break_down_log(
        &self,
        #[oai(name = "startDay")] start_day: Query<Option<String>>,
        #[oai(name = "endDay")] end_day: Query<Option<String>>,
    ) -> Result<Json<Vec<BreakDownLogView>>, StatError> {
        let range = parse_range(start_day.as_deref(), end_day.as_deref())?;
        self.stat_service
            .query_break_down_log(range)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }

    /// Last ten sensor frames of a vehicle, oldest first
    #[oai(path = "/sensor/:vin", method = "get", tag = "ApiTags::Stat")]
    async fn sensor(&self, vin: Path<String>) -> Result<Json<Vec<SensorReadingView>>, StatError> {
        self.stat_service
            .sensor(&vin.0)
            .await
            .map(Json)
            .map_err(StatError::from_internal_error)
    }
}
