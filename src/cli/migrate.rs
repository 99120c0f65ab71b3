use crate::config::{connect_database, migrate_database, BootstrapSettings};

/// Run database migrations
///
/// Connects and applies every pending migration without building AppData.
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(...)` - Connection or migration failed
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings.database_url()).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
