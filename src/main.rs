//! Sales Dashboard Server
//!
//! Run with: cargo run --bin sales-dashboard
//!
//! # Configuration
//!
//! A TOML file (`--config`, or the default locations) plus environment
//! overrides:
//! - `SALES_DASHBOARD_DATA_PATH`: CSV file (default: base_vendas.csv)
//! - `SALES_DASHBOARD_API_HOST` / `SALES_DASHBOARD_API_PORT`
//! - `SALES_DASHBOARD_STATIC_DIR`: built dashboard UI to serve
//! - `SALES_DASHBOARD_LOG_LEVEL` / `SALES_DASHBOARD_LOG_FORMAT`
//! - `RUST_LOG`: overrides the log filter entirely

use anyhow::Context;
use clap::Parser;
use sales_dashboard::api::{serve, AppState};
use sales_dashboard::config::{Config, LoggingConfig};
use sales_dashboard::data::{CsvLoader, TableCache};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sales-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the sales dashboard API and UI")]
struct Args {
    /// Configuration file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file to serve, overrides the configuration
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data) = args.data {
        config.data.path = data.display().to_string();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting sales dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data file: {}", config.data.path);

    let loader = CsvLoader::new().with_delimiter(config.data.delimiter_byte()?);
    let cache = TableCache::new(&config.data.path, loader);

    // A missing or malformed dataset is fatal at startup
    let table = cache
        .load()
        .with_context(|| format!("Failed to load sales data from {}", config.data.path))?;
    tracing::info!("Serving {} records", table.len());

    if let Some(dir) = &config.api.static_dir {
        tracing::info!("Serving dashboard UI from {}", dir);
    }

    let state = AppState::new(cache, config.display.clone(), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Sales dashboard stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sales_dashboard={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
