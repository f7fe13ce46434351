use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weather_summary::{AppConfig, AppState, GeocodeClient, WeatherTable, logging, web};

/// Weather summary HTTP service
#[derive(Debug, Parser)]
#[command(name = "weather-summary", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Weather dataset CSV, overrides `dataset.path`
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Bind host, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(cli.config)?;
    if let Some(dataset) = cli.dataset {
        config.dataset.path = dataset;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    logging::init(&config.logging);
    tracing::info!(version = weather_summary::VERSION, "Starting weather summary service");

    let table = WeatherTable::load(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset.path.display()))?;

    let geocoder = GeocodeClient::new(&config.geocoding)?;
    if !geocoder.has_api_key() {
        tracing::warn!("No geocoding API key configured, /resolve_zip will fail");
    }

    web::run(&config.server, AppState::new(table, geocoder)).await
}
