use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_FIRE_VIEW: &str = "CREATE VIEW v_bus_fire_log AS \
    SELECT f.id, f.vin, f.group_id, f.log_year, f.log_month, f.log_day, f.log_time, f.fire_level, \
           m.name AS model_name, g.name AS group_name \
    FROM bus_fire_log f \
    LEFT JOIN bus b ON b.vin = f.vin \
    LEFT JOIN bus_model m ON m.id = b.model_id \
    LEFT JOIN sys_group g ON g.id = f.group_id";

const CREATE_BREAK_DOWN_VIEW: &str = "CREATE VIEW v_bus_break_down_log AS \
    SELECT d.id, d.vin, d.group_id, d.log_year, d.log_month, d.log_day, d.log_time, d.fault_code, d.fault_desc, \
           m.name AS model_name, g.name AS group_name \
    FROM bus_break_down_log d \
    LEFT JOIN bus b ON b.vin = d.vin \
    LEFT JOIN bus_model m ON m.id = b.model_id \
    LEFT JOIN sys_group g ON g.id = d.group_id";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BusModel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusModel::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BusModel::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bus::Vin)
                            .string_len(17)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bus::PlateNo).string_len(20).null())
                    .col(ColumnDef::new(Bus::ModelId).integer().null())
                    .col(ColumnDef::new(Bus::GroupId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bus_model_id")
                            .from(Bus::Table, Bus::ModelId)
                            .to(BusModel::Table, BusModel::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                log_table(BusOnOffLog::Table)
                    .col(
                        ColumnDef::new(BusOnOffLog::Online)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                log_table(BusFireLog::Table)
                    .col(
                        ColumnDef::new(BusFireLog::FireLevel)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                log_table(BusBreakDownLog::Table)
                    .col(ColumnDef::new(BusBreakDownLog::FaultCode).string_len(20).null())
                    .col(ColumnDef::new(BusBreakDownLog::FaultDesc).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(day_index("idx_bus_on_off_log_day", BusOnOffLog::Table))
            .await?;

        manager
            .create_index(day_index("idx_bus_fire_log_day", BusFireLog::Table))
            .await?;

        manager
            .create_index(day_index("idx_bus_break_down_log_day", BusBreakDownLog::Table))
            .await?;

        let db = manager.get_connection();
        db.execute_unprepared(CREATE_FIRE_VIEW).await?;
        db.execute_unprepared(CREATE_BREAK_DOWN_VIEW).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP VIEW IF EXISTS v_bus_break_down_log").await?;
        db.execute_unprepared("DROP VIEW IF EXISTS v_bus_fire_log").await?;

        manager
            .drop_table(Table::drop().table(BusBreakDownLog::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BusFireLog::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BusOnOffLog::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bus::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BusModel::Table).to_owned())
            .await
    }
}

/// Columns shared by every append-only telemetry log table
fn log_table<T: IntoIden + 'static>(table: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(LogColumn::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(LogColumn::Vin).string_len(17).not_null())
        .col(ColumnDef::new(LogColumn::GroupId).integer().null())
        .col(ColumnDef::new(LogColumn::LogYear).integer().not_null())
        .col(ColumnDef::new(LogColumn::LogMonth).integer().not_null())
        .col(ColumnDef::new(LogColumn::LogDay).integer().not_null())
        .col(ColumnDef::new(LogColumn::LogTime).big_integer().not_null())
        .to_owned()
}

/// Reports always filter on the (year, month, day) partition tuple
fn day_index<T: IntoIden + 'static>(name: &str, table: T) -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(LogColumn::LogYear)
        .col(LogColumn::LogMonth)
        .col(LogColumn::LogDay)
        .to_owned()
}

#[derive(DeriveIden)]
enum BusModel {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Bus {
    Table,
    Vin,
    PlateNo,
    ModelId,
    GroupId,
}

#[derive(DeriveIden)]
enum LogColumn {
    Id,
    Vin,
    GroupId,
    LogYear,
    LogMonth,
    LogDay,
    LogTime,
}

#[derive(DeriveIden)]
enum BusOnOffLog {
    Table,
    Online,
}

#[derive(DeriveIden)]
enum BusFireLog {
    Table,
    FireLevel,
}

#[derive(DeriveIden)]
enum BusBreakDownLog {
    Table,
    FaultCode,
    FaultDesc,
}
