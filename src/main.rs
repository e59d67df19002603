// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::fee_history_watcher::FeeHistoryWatcher;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::fee_api_repository::FeeApiRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::{build_router, serve_until};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FeeApiRepository::new(app_config.api.base_url));

    // Start the refresh watcher (application layer)
    let fee_history = FeeHistoryWatcher::spawn(repository, app_config.watcher.initial_duration);

    let state = Arc::new(AppState {
        fee_history: fee_history.clone(),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address '{}'", app_config.server.bind))?;
    tracing::info!("Starting fee-history-watch service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_until(listener, router, fee_history, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;

    Ok(())
}
