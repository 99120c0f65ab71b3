mod common;

use std::sync::Arc;

use common::{
    insert_break_down_log, insert_bus, insert_bus_model, insert_fire_log, insert_group, insert_on_off_log,
    setup_app_data,
};
use fleetdesk_backend::app_data::AppData;
use fleetdesk_backend::errors::internal::{GroupError, QueryError};
use fleetdesk_backend::errors::InternalError;
use fleetdesk_backend::services::StatService;
use fleetdesk_backend::types::db::Status;
use fleetdesk_backend::types::dto::stat::DailyCountView;
use fleetdesk_backend::types::internal::{DateRange, LogQuery, PageRequest};

struct Fleet {
    root: i32,
    north: i32,
    closed: i32,
}

/// Metro Bus with an enabled North depot and a disabled Closed depot.
///
/// VIN1 (K9) runs in North, VIN2 (E12) directly under Metro Bus and VIN3 (K9)
/// in Closed. Fire events in March 2024:
/// * 03-01: VIN1 twice, VIN2 once
/// * 03-02: VIN2 once, VIN3 once
///
/// plus one VIN1 fire on 04-01, outside the March range.
async fn seed_fleet(app_data: &Arc<AppData>) -> Fleet {
    let db = &app_data.db;
    let root = insert_group(db, "Metro Bus", None, Status::Enable).await.id;
    let north = insert_group(db, "North", Some(root), Status::Enable).await.id;
    let closed = insert_group(db, "Closed", Some(root), Status::Disable).await.id;

    let k9 = insert_bus_model(db, "K9").await.id;
    let e12 = insert_bus_model(db, "E12").await.id;
    insert_bus(db, "VIN1", k9, Some(north)).await;
    insert_bus(db, "VIN2", e12, Some(root)).await;
    insert_bus(db, "VIN3", k9, Some(closed)).await;

    insert_fire_log(db, "VIN1", Some(north), (2024, 3, 1), 100).await;
    insert_fire_log(db, "VIN1", Some(north), (2024, 3, 1), 110).await;
    insert_fire_log(db, "VIN2", Some(root), (2024, 3, 1), 120).await;
    insert_fire_log(db, "VIN2", Some(root), (2024, 3, 2), 200).await;
    insert_fire_log(db, "VIN3", Some(closed), (2024, 3, 2), 210).await;
    insert_fire_log(db, "VIN1", Some(north), (2024, 4, 1), 300).await;

    insert_break_down_log(db, "VIN1", Some(north), (2024, 3, 5), 500).await;
    insert_break_down_log(db, "VIN3", Some(closed), (2024, 3, 5), 510).await;

    insert_on_off_log(db, "VIN1", Some(north), (2024, 3, 1), 90, true).await;
    insert_on_off_log(db, "VIN1", Some(north), (2024, 3, 1), 400, false).await;
    insert_on_off_log(db, "VIN2", Some(root), (2024, 2, 29), 10, true).await;

    Fleet { root, north, closed }
}

fn march() -> DateRange {
    DateRange::from_days(Some("2024-03-01"), Some("2024-03-31")).unwrap()
}

/// (day, dimension, count) sorted, for order-independent comparison within a day
fn summarize(rows: &[DailyCountView]) -> Vec<(i32, Option<String>, i64)> {
    let mut out: Vec<_> = rows.iter().map(|r| (r.day, r.dimension.clone(), r.count)).collect();
    out.sort();
    out
}

#[tokio::test]
async fn test_fire_count_overall() {
    let app_data = setup_app_data().await;
    seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let rows = service.fire_count(None, march()).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].year, rows[0].month, rows[0].day, rows[0].count), (2024, 3, 1, 3));
    assert_eq!((rows[1].day, rows[1].count), (2, 2));
    assert!(rows.iter().all(|r| r.dimension.is_none()));
}

#[tokio::test]
async fn test_fire_count_under_root_skips_disabled_subtree() {
    let app_data = setup_app_data().await;
    let fleet = seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let rows = service.fire_count(Some(fleet.root), march()).await.unwrap();
    assert_eq!(summarize(&rows), vec![(1, None, 3), (2, None, 1)]);

    let rows = service.fire_count(Some(fleet.north), march()).await.unwrap();
    assert_eq!(summarize(&rows), vec![(1, None, 2)]);
}

#[tokio::test]
async fn test_fire_count_by_bus_model() {
    let app_data = setup_app_data().await;
    let fleet = seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let rows = service.fire_count_by_bus_model(Some(fleet.root), march()).await.unwrap();

    assert_eq!(
        summarize(&rows),
        vec![
            (1, Some("E12".to_string()), 1),
            (1, Some("K9".to_string()), 2),
            (2, Some("E12".to_string()), 1),
        ]
    );
    assert!(rows.windows(2).all(|w| w[0].day <= w[1].day));
}

#[tokio::test]
async fn test_fire_count_by_group() {
    let app_data = setup_app_data().await;
    seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let rows = service.fire_count_by_group(None, march()).await.unwrap();

    assert_eq!(
        summarize(&rows),
        vec![
            (1, Some("Metro Bus".to_string()), 1),
            (1, Some("North".to_string()), 2),
            (2, Some("Closed".to_string()), 1),
            (2, Some("Metro Bus".to_string()), 1),
        ]
    );
}

#[tokio::test]
async fn test_break_down_counts() {
    let app_data = setup_app_data().await;
    let fleet = seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let overall = service.break_down_count(None, march()).await.unwrap();
    assert_eq!(summarize(&overall), vec![(5, None, 2)]);

    let by_model = service.break_down_count_by_bus_model(None, march()).await.unwrap();
    assert_eq!(summarize(&by_model), vec![(5, Some("K9".to_string()), 2)]);

    let by_group = service.break_down_count_by_group(Some(fleet.root), march()).await.unwrap();
    assert_eq!(summarize(&by_group), vec![(5, Some("North".to_string()), 1)]);
}

#[tokio::test]
async fn test_counts_outside_range_are_empty() {
    let app_data = setup_app_data().await;
    seed_fleet(&app_data).await;
    let service = StatService::new(app_data);
    let january = DateRange::from_days(Some("2024-01-01"), Some("2024-01-31")).unwrap();

    assert!(service.fire_count(None, january).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_root_group() {
    let app_data = setup_app_data().await;
    seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    assert!(matches!(
        service.fire_count_by_group(Some(999), march()).await,
        Err(InternalError::Group(GroupError::GroupIdNotFound { group_id: 999 }))
    ));
}

#[tokio::test]
async fn test_fire_page_filters_by_group_subtree() {
    let app_data = setup_app_data().await;
    let fleet = seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let query = LogQuery {
        vin: None,
        group_id: Some(fleet.root),
        range: march(),
    };
    let page = service.find_fire_page(&query, PageRequest { page: 0, size: 2 }).await.unwrap();

    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.iter().map(|i| i.log_time).collect::<Vec<_>>(), vec![200, 120]);

    let query = LogQuery {
        vin: Some("VIN3".to_string()),
        group_id: None,
        range: march(),
    };
    let page = service.find_fire_page(&query, PageRequest { page: 0, size: 10 }).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].group_id, Some(fleet.closed));
}

#[tokio::test]
async fn test_on_off_and_break_down_pages() {
    let app_data = setup_app_data().await;
    let fleet = seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let query = LogQuery {
        vin: Some("VIN1".to_string()),
        group_id: Some(fleet.north),
        range: march(),
    };
    let on_off = service.find_on_off_page(&query, PageRequest { page: 0, size: 10 }).await.unwrap();
    assert_eq!(on_off.items.iter().map(|i| i.online).collect::<Vec<_>>(), vec![false, true]);

    let break_down = service
        .find_break_down_page(&query, PageRequest { page: 0, size: 10 })
        .await
        .unwrap();
    assert_eq!(break_down.total, 1);
    assert_eq!(break_down.items[0].fault_code.as_deref(), Some("E01"));
}

#[tokio::test]
async fn test_query_logs_are_oldest_first() {
    let app_data = setup_app_data().await;
    seed_fleet(&app_data).await;
    let service = StatService::new(app_data);

    let fires = service.query_fire_log(march()).await.unwrap();
    assert_eq!(fires.iter().map(|f| f.log_time).collect::<Vec<_>>(), vec![100, 110, 120, 200, 210]);

    let on_off = service.query_on_off_log(march()).await.unwrap();
    assert_eq!(on_off.iter().map(|o| o.log_time).collect::<Vec<_>>(), vec![90, 400]);

    let leap_day = DateRange::from_days(Some("2024-02-29"), Some("2024-02-29")).unwrap();
    assert_eq!(service.query_on_off_log(leap_day).await.unwrap().len(), 1);

    assert_eq!(service.query_break_down_log(march()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_sensor_requires_postgres() {
    let app_data = setup_app_data().await;
    let service = StatService::new(app_data);

    match service.sensor("VIN1").await {
        Err(InternalError::Query(QueryError::UnsupportedBackend { operation, backend })) => {
            assert_eq!(operation, "Sensor query");
            assert_eq!(backend, "Sqlite");
        }
        other => panic!("Expected UnsupportedBackend, got {:?}", other.map(|rows| rows.len())),
    }
}
