use std::sync::Arc;

use clap::Parser;
use poem::{listener::TcpListener, Server};

use fleetdesk_backend::api;
use fleetdesk_backend::app_data::AppData;
use fleetdesk_backend::cli::{execute_command, Cli, Commands};
use fleetdesk_backend::config::{init_database, init_logging, BootstrapSettings, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&LoggingConfig::from_env())?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Bootstrap settings: {:?}", settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(settings).await,
        command => execute_command(command, settings).await,
    }
}

async fn serve(settings: BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(&settings).await?;
    let address = settings.server_address();

    let app_data = Arc::new(AppData::init(db, settings).await?);
    let app = api::routes(app_data, &format!("http://{}/api", address));

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
