//! Rental Catalog HTTP server
//!
//! Serves the JSON API over the configured content source.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rental_catalog::{
    config::{DEFAULT_CONFIG_PATH, load_config},
    error::{AppError, Result},
    models::LoggingConfig,
    server::{self, AppState},
    services::Catalog,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "rental-catalog-server", version, about = "Rental catalog JSON API")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Initialize tracing; `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = load_config(&args.config);
    init_tracing(&loaded.config.logging);
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    let config = loaded.config;

    config.validate()?;
    let config = Arc::new(config);

    let catalog = Catalog::from_config(Arc::clone(&config))?;
    tracing::info!("Content source: {}", catalog.source_name());

    let app = server::router(AppState::new(catalog, Arc::clone(&config)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| AppError::config(format!("invalid listen address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
