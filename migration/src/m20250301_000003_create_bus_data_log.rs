use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Raw sensor frames keep the sensor list as a jsonb array, which only
// PostgreSQL can store and index positionally.
const CREATE_BUS_DATA_LOG: &str = "CREATE TABLE IF NOT EXISTS bus_data_log ( \
    id SERIAL PRIMARY KEY, \
    vin VARCHAR(17) NOT NULL, \
    upload_time TIMESTAMP NOT NULL, \
    bus_data JSONB, \
    sensores JSONB[] \
)";

const CREATE_BUS_DATA_LOG_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bus_data_log_vin_time ON bus_data_log (vin, upload_time DESC)";

const CREATE_DATA_VIEW: &str = "CREATE VIEW v_bus_data_log AS \
    SELECT d.id, d.vin, d.upload_time, d.bus_data, d.sensores, b.group_id \
    FROM bus_data_log d \
    LEFT JOIN bus b ON b.vin = d.vin";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared(CREATE_BUS_DATA_LOG).await?;
        db.execute_unprepared(CREATE_BUS_DATA_LOG_INDEX).await?;
        db.execute_unprepared(CREATE_DATA_VIEW).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        db.execute_unprepared("DROP VIEW IF EXISTS v_bus_data_log").await?;
        db.execute_unprepared("DROP TABLE IF EXISTS bus_data_log").await?;

        Ok(())
    }
}
