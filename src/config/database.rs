use sea_orm::{Database, DatabaseConnection};
use migration::{MigratorTrait, SystemMigrator};
use crate::config::BootstrapSettings;
use crate::errors::internal::{DatabaseError, InternalError};

/// Connect to the configured database and bring its schema up to date
pub async fn init_database(bootstrap_settings: &BootstrapSettings) -> Result<DatabaseConnection, InternalError> {
    let db = connect_database(bootstrap_settings.database_url()).await?;
    migrate_database(&db).await?;
    Ok(db)
}

/// Open a connection pool without running migrations
///
/// # Arguments
/// * `database_url` - sea-orm connection string (sqlite or postgres)
///
/// # Returns
/// * `Ok(DatabaseConnection)` - Connection established successfully
/// * `Err(InternalError)` - Connection failed
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    SystemMigrator::up(db, None)
        .await
        .map_err(|source| InternalError::Database(DatabaseError::Migration { source }))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}
