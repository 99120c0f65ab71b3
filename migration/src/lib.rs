pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_system_schema;
mod m20250301_000002_create_telemetry_schema;
mod m20250301_000003_create_bus_data_log;

pub struct SystemMigrator;

#[async_trait::async_trait]
impl MigratorTrait for SystemMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_system_schema::Migration),
            Box::new(m20250301_000002_create_telemetry_schema::Migration),
            Box::new(m20250301_000003_create_bus_data_log::Migration),
        ]
    }
}
