mod commands;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use clap::{Parser, Subcommand};
use planet_catalog_core::{CatalogConfig, redact_credentials};
use planet_catalog_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planet-catalog")]
#[command(about = "REST catalog of planets, climates and terrains", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        /// IPv4 or IPv6 address to listen on
        #[arg(short = 'H', long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        host: IpAddr,
    },
    /// Import the remote planet list once and print the report
    Sync,
}

async fn connect_storage(config: &CatalogConfig) -> Result<StorageBackend> {
    let storage = StorageBackend::connect(&config.database_url).await?;
    tracing::info!(
        backend = storage.kind(),
        url = %redact_credentials(&config.database_url),
        "storage ready"
    );
    Ok(storage)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Serve { port, host } => {
            commands::serve::run(&config, SocketAddr::new(host, port)).await?;
        },
        Commands::Sync => commands::sync::run(&config).await?,
    }

    Ok(())
}
