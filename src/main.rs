//! Tezos Gateway Adapter — Entry Point
//!
//! Initializes configuration, logging, the chain client, and the HTTP
//! surface. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build the RpcChainClient for the configured (chain, network)
//! 4. Serve the five gateway operations over axum
//! 5. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use tezos_gateway::adapters::http;
use tezos_gateway::adapters::node::RpcChainClient;
use tezos_gateway::config;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.server.log_level)
            }),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network.name,
        tokens = config.tokens.len(),
        "Starting Tezos gateway adapter"
    );

    // ── 3. Build the chain client (ChainClient port) ────────
    let client = Arc::new(RpcChainClient::new(&config).context("Failed to build chain client")?);

    // ── 4. Serve the gateway operations ─────────────────────
    let app = http::router(client);
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!(addr = %config.server.bind, "Gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
