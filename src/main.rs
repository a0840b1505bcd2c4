//! Localisation Dispatch Engine - Starts translation projects
//!
//! The engine is a small HTTP service that:
//! - Validates caller tokens against IMS
//! - Reads translation projects from Odin
//! - Fans out one localisation request per project item, in bounded batches
//!   with per-item retry
//! - Reports every item that still failed once its retries ran out

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loc_dispatch=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Localisation Dispatch Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Odin: {}", config.odin_endpoint);
    tracing::info!("  IMS: {}", config.ims_endpoint);
    tracing::info!(
        "  Dispatch: batch_size={}, max_retries={}, backoff={}..{}ms",
        config.batch_size,
        config.max_retries,
        config.base_backoff_ms,
        config.max_backoff_ms
    );

    let state = Arc::new(AppState::new(config)?);
    let shutdown = state.shutdown.clone();
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Application state initialized");

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // In-flight dispatches stop retrying once shutdown is signalled
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, cancelling dispatches...");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
