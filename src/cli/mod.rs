// CLI module for administrative operations requiring server access

pub mod bootstrap;
pub mod epsg;
pub mod migrate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::BootstrapSettings;

/// Fleetdesk back office server and administrative commands
#[derive(Parser)]
#[command(name = "fleetdesk")]
#[command(about = "Fleet back office server and administration CLI", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create the super administrator account if it does not exist
    Bootstrap,

    /// Rewrite an MS-Access flavoured EPSG script to ANSI table names
    EpsgAdapt {
        /// Schema qualifying every table; falls back to EPSG_SCHEMA
        #[arg(long)]
        schema: Option<String>,

        /// Script to read; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Execute an administrative command
///
/// `serve` is handled by main and is rejected here.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    settings: BootstrapSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => Err("serve is not an administrative command".into()),
        Commands::Migrate => migrate::run_migrations(&settings).await,
        Commands::Bootstrap => bootstrap::bootstrap_system(settings).await,
        Commands::EpsgAdapt { schema, input } => {
            let schema = schema.or_else(|| settings.epsg_schema().map(str::to_string));
            epsg::adapt_script(schema.as_deref(), input.as_deref())
        }
    }
}
