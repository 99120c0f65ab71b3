use std::fmt::Write as _;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult};

use crate::app_data::AppData;
use crate::errors::internal::QueryError;
use crate::errors::InternalError;
use crate::services::NamedQuery;
use crate::stores::{GroupStore, LogFilter, TelemetryStore};
use crate::types::db::{bus_break_down_log, bus_fire_log, bus_on_off_log};
use crate::types::dto::stat::{
    BreakDownLogPage, BreakDownLogView, DailyCountView, FireLogPage, FireLogView, OnOffLogPage,
    OnOffLogView, SensorReadingView,
};
use crate::types::internal::{
    DailyCountRow, DateRange, LogQuery, PageRequest, QueryParams, SensorRow, SENSOR_SLOTS,
};

/// Report view a daily count is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountSource {
    Fire,
    BreakDown,
}

impl CountSource {
    fn view(&self) -> &'static str {
        match self {
            CountSource::Fire => "v_bus_fire_log",
            CountSource::BreakDown => "v_bus_break_down_log",
        }
    }
}

/// Extra grouping column of a daily count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    BusModel,
    Group,
    Overall,
}

impl Dimension {
    fn column(&self) -> Option<&'static str> {
        match self {
            Dimension::BusModel => Some("model_name"),
            Dimension::Group => Some("group_name"),
            Dimension::Overall => None,
        }
    }
}

/// Builds the native daily count statement for one source and dimension
///
/// The date bounds bind as `:startYear` .. `:endDay`; `by_group_ids` adds a
/// `:groupIds` list filter.
fn daily_count_sql(source: CountSource, dimension: Dimension, by_group_ids: bool) -> String {
    let mut sql = String::from("select ");
    if let Some(column) = dimension.column() {
        let _ = write!(sql, "{} as dimension, ", column);
    }
    let _ = write!(
        sql,
        "log_year, log_month, log_day, count(1) ct from {} f where {}",
        source.view(),
        DateRange::SQL_PREDICATE
    );
    if by_group_ids {
        sql.push_str(" and group_id in (:groupIds)");
    }
    sql.push_str(" group by ");
    if let Some(column) = dimension.column() {
        let _ = write!(sql, "{}, ", column);
    }
    sql.push_str("log_year, log_month, log_day order by log_year, log_month, log_day");
    sql
}

/// Last ten sensor frames of one vehicle, oldest first
///
/// The sensor array is unpivoted into `sn1`..`state6` columns.
fn sensor_sql() -> String {
    let mut sql = String::from(
        "select * from (select vin, upload_time, array_length(sensores, 1) ct, \
         bus_data->>'isFire' as isfire, bus_data->>'isError' as iserror",
    );
    for i in 1..=SENSOR_SLOTS {
        for field in ["sn", "temp", "concen", "fire", "error", "state"] {
            let _ = write!(sql, ", sensores[{i}]->>'{field}' as {field}{i}");
        }
    }
    sql.push_str(
        " from v_bus_data_log where array_length(sensores, 1) is not null and vin = :vin \
         order by upload_time desc limit 10) b order by upload_time asc",
    );
    sql
}

/// Vehicle statistics: daily event counts, log listings and sensor frames
pub struct StatService {
    db: DatabaseConnection,
    group_store: Arc<GroupStore>,
    on_off_store: TelemetryStore<bus_on_off_log::Entity>,
    fire_store: TelemetryStore<bus_fire_log::Entity>,
    break_down_store: TelemetryStore<bus_break_down_log::Entity>,
}

impl StatService {
    /// Create StatService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            group_store: app_data.group_store.clone(),
            on_off_store: TelemetryStore::new(),
            fire_store: TelemetryStore::new(),
            break_down_store: TelemetryStore::new(),
        }
    }

    /// Daily fire counts per bus model
    pub async fn fire_count_by_bus_model(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::Fire, Dimension::BusModel, root_group_id, range).await
    }

    /// Daily breakdown counts per bus model
    pub async fn break_down_count_by_bus_model(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::BreakDown, Dimension::BusModel, root_group_id, range).await
    }

    /// Daily fire counts per route group
    pub async fn fire_count_by_group(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::Fire, Dimension::Group, root_group_id, range).await
    }

    /// Daily breakdown counts per route group
    pub async fn break_down_count_by_group(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::BreakDown, Dimension::Group, root_group_id, range).await
    }

    pub async fn fire_count(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::Fire, Dimension::Overall, root_group_id, range).await
    }

    pub async fn break_down_count(
        &self,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        self.daily_counts(CountSource::BreakDown, Dimension::Overall, root_group_id, range).await
    }

    /// Run one daily count report
    ///
    /// With a root group, only events of that group and its enabled
    /// descendants are counted.
    ///
    /// # Returns
    /// * `Ok(Vec<DailyCountView>)` - One row per day (and dimension value), in day order
    /// * `Err(InternalError)` - `GroupIdNotFound` for an unknown root, or a query error
    async fn daily_counts(
        &self,
        source: CountSource,
        dimension: Dimension,
        root_group_id: Option<i32>,
        range: DateRange,
    ) -> Result<Vec<DailyCountView>, InternalError> {
        let mut params = QueryParams::new();
        range.bind(&mut params);

        if let Some(root_id) = root_group_id {
            let group_ids = self.group_store.expand_descendant_ids(&self.db, root_id).await?;
            params.insert_list("groupIds", group_ids);
        }

        let sql = daily_count_sql(source, dimension, root_group_id.is_some());
        let stmt = NamedQuery::new(&sql)?.bind(self.db.get_database_backend(), &params)?;

        tracing::debug!("Daily count {:?}/{:?} from {} to {}", source, dimension, range.start, range.end);

        let with_dimension = dimension.column().is_some();
        self.db
            .query_all(stmt)
            .await
            .and_then(|rows| {
                rows.iter()
                    .map(|row| DailyCountRow::from_result(row, with_dimension).map(DailyCountView::from))
                    .collect::<Result<Vec<_>, DbErr>>()
            })
            .map_err(|e| InternalError::database("daily_count", e))
    }

    pub async fn find_on_off_page(&self, query: &LogQuery, page: PageRequest) -> Result<OnOffLogPage, InternalError> {
        let filter = self.log_filter(query).await?;
        let result = self.on_off_store.find_page(&self.db, &filter, page).await?;

        Ok(OnOffLogPage {
            items: result.items.into_iter().map(OnOffLogView::from).collect(),
            page: page.page,
            size: page.size,
            total: result.total,
            total_pages: result.total_pages,
        })
    }

    pub async fn find_fire_page(&self, query: &LogQuery, page: PageRequest) -> Result<FireLogPage, InternalError> {
        let filter = self.log_filter(query).await?;
        let result = self.fire_store.find_page(&self.db, &filter, page).await?;

        Ok(FireLogPage {
            items: result.items.into_iter().map(FireLogView::from).collect(),
            page: page.page,
            size: page.size,
            total: result.total,
            total_pages: result.total_pages,
        })
    }

    pub async fn find_break_down_page(
        &self,
        query: &LogQuery,
        page: PageRequest,
    ) -> Result<BreakDownLogPage, InternalError> {
        let filter = self.log_filter(query).await?;
        let result = self.break_down_store.find_page(&self.db, &filter, page).await?;

        Ok(BreakDownLogPage {
            items: result.items.into_iter().map(BreakDownLogView::from).collect(),
            page: page.page,
            size: page.size,
            total: result.total,
            total_pages: result.total_pages,
        })
    }

    /// Every on/off event inside `range`, oldest first
    pub async fn query_on_off_log(&self, range: DateRange) -> Result<Vec<OnOffLogView>, InternalError> {
        let rows = self.on_off_store.find_all(&self.db, &LogFilter::within(range)).await?;
        Ok(rows.into_iter().map(OnOffLogView::from).collect())
    }

    /// Every fire event inside `range`, oldest first
    pub async fn query_fire_log(&self, range: DateRange) -> Result<Vec<FireLogView>, InternalError> {
        let rows = self.fire_store.find_all(&self.db, &LogFilter::within(range)).await?;
        Ok(rows.into_iter().map(FireLogView::from).collect())
    }

    /// Every breakdown event inside `range`, oldest first
    pub async fn query_break_down_log(&self, range: DateRange) -> Result<Vec<BreakDownLogView>, InternalError> {
        let rows = self.break_down_store.find_all(&self.db, &LogFilter::within(range)).await?;
        Ok(rows.into_iter().map(BreakDownLogView::from).collect())
    }

    /// Last ten sensor frames of `vin` that carry a sensor array, oldest first
    ///
    /// # Returns
    /// * `Ok(Vec<SensorReadingView>)` - Up to ten readings
    /// * `Err(InternalError)` - `UnsupportedBackend` unless the database is PostgreSQL
    pub async fn sensor(&self, vin: &str) -> Result<Vec<SensorReadingView>, InternalError> {
        let backend = self.db.get_database_backend();
        if backend != DbBackend::Postgres {
            return Err(QueryError::UnsupportedBackend {
                operation: "Sensor query".to_string(),
                backend: format!("{:?}", backend),
            }
            .into());
        }

        let params = QueryParams::new().with("vin", vin);
        let stmt = NamedQuery::new(&sensor_sql())?.bind(backend, &params)?;

        let rows = SensorRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("sensor", e))?;

        Ok(rows.into_iter().map(SensorReadingView::from).collect())
    }

    async fn log_filter(&self, query: &LogQuery) -> Result<LogFilter, InternalError> {
        let group_ids = match query.group_id {
            Some(group_id) => Some(self.group_store.expand_descendant_ids(&self.db, group_id).await?),
            None => None,
        };

        Ok(LogFilter {
            vin: query.vin.clone(),
            group_ids,
            range: Some(query.range),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;
    use sea_orm::Statement;

    async fn single_row(db: &DatabaseConnection, sql: &str) -> sea_orm::QueryResult {
        let stmt = Statement::from_string(db.get_database_backend(), sql.to_string());
        db.query_one(stmt).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_daily_count_row_reads_dimension_when_selected() {
        let db = setup_test_db().await;
        let row = single_row(&db, "select 'K9' as dimension, 2024 as log_year, 3 as log_month, 1 as log_day, 4 as ct").await;

        let parsed = DailyCountRow::from_result(&row, true).unwrap();

        assert_eq!(parsed.dimension.as_deref(), Some("K9"));
        assert_eq!((parsed.log_year, parsed.log_month, parsed.log_day, parsed.ct), (2024, 3, 1, 4));
    }

    #[tokio::test]
    async fn test_daily_count_row_without_dimension() {
        let db = setup_test_db().await;
        let row = single_row(&db, "select 2024 as log_year, 3 as log_month, 1 as log_day, 4 as ct").await;

        assert_eq!(DailyCountRow::from_result(&row, false).unwrap().dimension, None);
        // A report that expects a dimension must not silently lose it
        assert!(DailyCountRow::from_result(&row, true).is_err());
    }

    #[test]
    fn test_daily_count_sql_by_model_with_groups() {
        let sql = daily_count_sql(CountSource::Fire, Dimension::BusModel, true);

        assert!(sql.starts_with("select model_name as dimension, log_year, log_month, log_day, count(1) ct from v_bus_fire_log f where "));
        assert!(sql.contains(" and group_id in (:groupIds) group by model_name, log_year, log_month, log_day"));
    }

    #[test]
    fn test_daily_count_sql_overall_without_groups() {
        let sql = daily_count_sql(CountSource::BreakDown, Dimension::Overall, false);

        assert!(sql.starts_with("select log_year, log_month, log_day, count(1) ct from v_bus_break_down_log f"));
        assert!(!sql.contains("dimension"));
        assert!(!sql.contains(":groupIds"));
        assert!(sql.contains("group by log_year, log_month, log_day"));
    }

    #[test]
    fn test_daily_count_sql_binds_every_placeholder() {
        let sql = daily_count_sql(CountSource::Fire, Dimension::Group, true);
        let query = NamedQuery::new(&sql).unwrap();

        assert_eq!(
            query.param_names(),
            vec!["startYear", "startMonth", "startDay", "endYear", "endMonth", "endDay", "groupIds"]
        );
    }

    #[test]
    fn test_sensor_sql_unpivots_six_slots() {
        let sql = sensor_sql();

        assert!(sql.contains("sensores[1]->>'sn' as sn1"));
        assert!(sql.contains("sensores[6]->>'state' as state6"));
        assert!(sql.contains("bus_data->>'isFire' as isfire"));
        assert!(sql.ends_with("limit 10) b order by upload_time asc"));
        assert_eq!(NamedQuery::new(&sql).unwrap().param_names(), vec!["vin"]);
    }
}
