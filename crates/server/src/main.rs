//! Energy Dashboard Server - Factory energy aggregation service
//!
//! This binary polls the mock REST backend for readings, machines,
//! alerts and recommendations, keeps the latest snapshot in memory,
//! and serves the aggregated dashboard views over HTTP.

use anyhow::Result;
use energy_lib::{
    enrich::HeuristicForecaster,
    health::{components, HealthRegistry},
    observability::{DashboardMetrics, StructuredLogger},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use energy_server::{api, config, refresh, source, state};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting energy-server");

    // Load configuration
    let config = config::ServerConfig::load()?;
    info!(site_name = %config.site_name, source_url = %config.source_url, "Server configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::SOURCE).await;
    health_registry.register(components::ENRICHMENT).await;

    // Initialize metrics
    let metrics = DashboardMetrics::new();

    // Initialize structured logger
    let logger = StructuredLogger::new(&config.site_name);
    logger.log_startup(SERVER_VERSION, &config.source_url);

    let store = state::SnapshotStore::new();
    let source = Arc::new(source::RestSource::new(&config.source_url)?);

    // Shutdown broadcast for background tasks
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    let refresh = refresh::RefreshLoop::new(
        source,
        store.clone(),
        health_registry.clone(),
        metrics.clone(),
        logger.clone(),
        refresh::RefreshConfig {
            interval: Duration::from_secs(config.refresh_interval_secs),
        },
    );
    let refresh_handle = tokio::spawn(refresh.run(shutdown_tx.subscribe()));

    // Create shared application state
    let app_state = Arc::new(api::AppState {
        store,
        health_registry: health_registry.clone(),
        metrics,
        logger: logger.clone(),
        forecaster: Arc::new(HeuristicForecaster),
        forecast_timeout: Duration::from_millis(config.forecast_timeout_ms),
    });

    // Start dashboard API server
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    let _ = shutdown_tx.send(());
    refresh_handle.abort();
    api_handle.abort();

    Ok(())
}
