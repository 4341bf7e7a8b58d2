mod api;
mod cache;
mod cache_manager;
mod config;
mod fetch;
mod pipeline;
mod query;
mod stats;
mod view;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::cache::fingerprint;
use crate::cache_manager::CatalogHandle;
use crate::config::Config;
use crate::fetch::CatalogClient;
use crate::stats::StatsTarget;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chainlistd=info")),
        )
        .init();

    tracing::info!("Starting chainlistd");

    // Load config
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/chainlist/chainlistd.toml".to_string());

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path))?;

    tracing::info!("Loaded config from {}", config_path);
    tracing::info!("Catalog host: {}", config.catalog.host());

    // Fingerprint starts at the empty-catalog value; the first successful
    // refresh replaces it
    let (fingerprint_tx, fingerprint_rx) = watch::channel(fingerprint::compute_fingerprint(&[]));

    // Start the catalog snapshot cache
    let client = CatalogClient::new(fetch::http_client(), &config.catalog);
    let catalog = CatalogHandle::spawn(client, config.cache.clone(), fingerprint_tx);

    // Create cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    // Spawn the RPC stats poller for the configured watch list
    let targets: Vec<StatsTarget> = config
        .stats
        .watch
        .iter()
        .map(|watch| StatsTarget {
            chain_id: watch.chain_id,
            rpc_url: fetch::rewrite_rpc_url(&watch.rpc, &config.catalog),
        })
        .collect();
    let (stats, stats_task) = stats::spawn(
        fetch::http_client(),
        targets,
        Duration::from_secs(config.stats.poll_interval_secs),
        cancel.clone(),
    );

    // Build API router
    let app_state = api::routes::AppState {
        catalog: catalog.clone(),
        fingerprint_rx,
        stats,
    };
    let app = api::routes::router(app_state);

    // Bind HTTP server
    let listener = tokio::net::TcpListener::bind(&config.api.listen)
        .await
        .with_context(|| format!("Failed to bind to {}", config.api.listen))?;

    tracing::info!("API listening on {}", config.api.listen);

    // Run server with graceful shutdown
    let server_cancel = cancel.clone();
    let server_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_cancel.cancelled().await })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutdown signal received");

    // Trigger cancellation
    cancel.cancel();

    // Wait for all tasks to complete
    let _ = tokio::join!(stats_task, server_task);

    // Shutdown the catalog cache task
    if let Err(e) = catalog.shutdown().await {
        tracing::error!("Failed to shutdown catalog cache: {}", e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
