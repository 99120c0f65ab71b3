// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{MigratorTrait, SystemMigrator};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Database, DatabaseConnection, EntityTrait, Set};

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::types::db::{bus, bus_break_down_log, bus_fire_log, bus_model, bus_on_off_log, group, group_role, role, Status};

pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

/// In-memory SQLite database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    SystemMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppData over a fresh test database with default settings
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let settings = BootstrapSettings::from_env_provider(Arc::new(MockEnvironment::empty()))
        .expect("Default settings must load");

    Arc::new(AppData::with_secret_manager(db, settings, SecretManager::from_pepper(TEST_PEPPER)))
}

pub async fn insert_group(db: &DatabaseConnection, name: &str, parent_id: Option<i32>, status: Status) -> group::Model {
    group::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        status: Set(status),
        sort_order: Set(0),
        create_time: Set(0),
    }
    .insert(db)
    .await
    .expect("Failed to insert group")
}

pub async fn insert_role(db: &DatabaseConnection, code: &str, enabled: bool, permissions: &[&str]) -> role::Model {
    role::ActiveModel {
        id: NotSet,
        code: Set(code.to_string()),
        name: Set(code.to_uppercase()),
        enabled: Set(enabled),
        permissions: Set(Some(serde_json::to_string(permissions).expect("Permissions serialize"))),
        create_time: Set(0),
    }
    .insert(db)
    .await
    .expect("Failed to insert role")
}

pub async fn link_group_role(db: &DatabaseConnection, group_id: i32, role_id: i32) {
    group_role::Entity::insert(group_role::ActiveModel {
        group_id: Set(group_id),
        role_id: Set(role_id),
    })
    .exec_without_returning(db)
    .await
    .expect("Failed to link group role");
}

pub async fn insert_bus(db: &DatabaseConnection, vin: &str, model_name: &str, group_id: Option<i32>) -> bus::Model {
    let model = bus_model::ActiveModel {
        id: NotSet,
        name: Set(model_name.to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert bus model");

    bus::ActiveModel {
        vin: Set(vin.to_string()),
        plate_no: Set(None),
        model_id: Set(Some(model.id)),
        group_id: Set(group_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert bus")
}

pub async fn insert_fire_log(db: &DatabaseConnection, vin: &str, group_id: Option<i32>, day: (i32, i32, i32), log_time: i64) {
    bus_fire_log::ActiveModel {
        id: NotSet,
        vin: Set(vin.to_string()),
        group_id: Set(group_id),
        log_year: Set(day.0),
        log_month: Set(day.1),
        log_day: Set(day.2),
        log_time: Set(log_time),
        fire_level: Set(1),
    }
    .insert(db)
    .await
    .expect("Failed to insert fire log");
}

pub async fn insert_break_down_log(db: &DatabaseConnection, vin: &str, group_id: Option<i32>, day: (i32, i32, i32), log_time: i64) {
    bus_break_down_log::ActiveModel {
        id: NotSet,
        vin: Set(vin.to_string()),
        group_id: Set(group_id),
        log_year: Set(day.0),
        log_month: Set(day.1),
        log_day: Set(day.2),
        log_time: Set(log_time),
        fault_code: Set(Some("E01".to_string())),
        fault_desc: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to insert break down log");
}

pub async fn insert_on_off_log(db: &DatabaseConnection, vin: &str, group_id: Option<i32>, day: (i32, i32, i32), log_time: i64, online: bool) {
    bus_on_off_log::ActiveModel {
        id: NotSet,
        vin: Set(vin.to_string()),
        group_id: Set(group_id),
        log_year: Set(day.0),
        log_month: Set(day.1),
        log_day: Set(day.2),
        log_time: Set(log_time),
        online: Set(online),
    }
    .insert(db)
    .await
    .expect("Failed to insert on/off log");
}
