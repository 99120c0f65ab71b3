use std::marker::PhantomData;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select};

use crate::errors::InternalError;
use crate::types::db::{bus_break_down_log, bus_fire_log, bus_on_off_log};
use crate::types::internal::{DateRange, PageRequest};

/// Columns shared by the append-only telemetry fact tables
pub trait TelemetryLog: EntityTrait {
    const VIN: Self::Column;
    const GROUP_ID: Self::Column;
    const LOG_YEAR: Self::Column;
    const LOG_MONTH: Self::Column;
    const LOG_DAY: Self::Column;
    const LOG_TIME: Self::Column;
}

macro_rules! telemetry_log {
    ($module:ident) => {
        impl TelemetryLog for $module::Entity {
            const VIN: $module::Column = $module::Column::Vin;
            const GROUP_ID: $module::Column = $module::Column::GroupId;
            const LOG_YEAR: $module::Column = $module::Column::LogYear;
            const LOG_MONTH: $module::Column = $module::Column::LogMonth;
            const LOG_DAY: $module::Column = $module::Column::LogDay;
            const LOG_TIME: $module::Column = $module::Column::LogTime;
        }
    };
}

telemetry_log!(bus_on_off_log);
telemetry_log!(bus_fire_log);
telemetry_log!(bus_break_down_log);

/// Filters applied to a telemetry listing
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub vin: Option<String>,
    /// Already expanded to include descendant groups
    pub group_ids: Option<Vec<i32>>,
    pub range: Option<DateRange>,
}

impl LogFilter {
    /// Only the date range, no vin or group restriction
    pub fn within(range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct LogPageResult<M> {
    pub items: Vec<M>,
    pub total: u64,
    pub total_pages: u64,
}

/// Read access to one telemetry fact table
pub struct TelemetryStore<E: TelemetryLog> {
    _entity: PhantomData<E>,
}

impl<E: TelemetryLog> Default for TelemetryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TelemetryLog> TelemetryStore<E> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }

    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        filter: &LogFilter,
        page: PageRequest,
    ) -> Result<LogPageResult<E::Model>, InternalError>
    where
        E::Model: Sync,
    {
        let paginator = Self::filtered(filter)
            .order_by_desc(E::LOG_TIME)
            .paginate(conn, page.size);

        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_telemetry_page", e))?;
        let items = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_telemetry_page", e))?;

        Ok(LogPageResult {
            items,
            total: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    /// Every row matching `filter`, oldest first
    pub async fn find_all(
        &self,
        conn: &impl ConnectionTrait,
        filter: &LogFilter,
    ) -> Result<Vec<E::Model>, InternalError> {
        Self::filtered(filter)
            .order_by_asc(E::LOG_TIME)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_telemetry_logs", e))
    }

    fn filtered(filter: &LogFilter) -> Select<E> {
        let mut select = E::find();

        if let Some(vin) = filter.vin.as_deref().filter(|v| !v.is_empty()) {
            select = select.filter(E::VIN.eq(vin));
        }
        if let Some(group_ids) = &filter.group_ids {
            select = select.filter(E::GROUP_ID.is_in(group_ids.iter().copied()));
        }
        if let Some(range) = &filter.range {
            let day_key = Expr::col(E::LOG_YEAR)
                .mul(10_000)
                .add(Expr::col(E::LOG_MONTH).mul(100))
                .add(Expr::col(E::LOG_DAY));
            select = select.filter(Expr::expr(day_key).between(range.start_key(), range.end_key()));
        }

        select
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{insert_fire_log, insert_on_off_log, setup_test_db};
    use chrono::NaiveDate;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_range_crosses_month_boundary() {
        let db = setup_test_db().await;
        let store = TelemetryStore::<bus_fire_log::Entity>::new();

        insert_fire_log(&db, "VIN1", Some(1), (2024, 1, 28), 1).await;
        insert_fire_log(&db, "VIN1", Some(1), (2024, 2, 3), 2).await;
        insert_fire_log(&db, "VIN1", Some(1), (2024, 2, 20), 3).await;
        insert_fire_log(&db, "VIN1", Some(1), (2024, 3, 1), 4).await;

        let rows = store
            .find_all(&db, &LogFilter::within(range((2024, 1, 25), (2024, 2, 10))))
            .await
            .unwrap();

        assert_eq!(rows.iter().map(|r| r.log_time).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_find_page_filters_vin_and_groups() {
        let db = setup_test_db().await;
        let store = TelemetryStore::<bus_on_off_log::Entity>::new();

        insert_on_off_log(&db, "VIN1", Some(1), (2024, 5, 1), 10, true).await;
        insert_on_off_log(&db, "VIN1", Some(2), (2024, 5, 2), 20, false).await;
        insert_on_off_log(&db, "VIN2", Some(1), (2024, 5, 3), 30, true).await;
        insert_on_off_log(&db, "VIN1", Some(3), (2024, 5, 4), 40, true).await;

        let filter = LogFilter {
            vin: Some("VIN1".to_string()),
            group_ids: Some(vec![1, 2]),
            range: None,
        };
        let page = store.find_page(&db, &filter, PageRequest { page: 0, size: 10 }).await.unwrap();

        assert_eq!(page.total, 2);
        // Newest first
        assert_eq!(page.items.iter().map(|r| r.log_time).collect::<Vec<_>>(), vec![20, 10]);
    }
}
