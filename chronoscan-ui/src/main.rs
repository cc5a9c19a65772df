//! chronoscan-ui - Triage Console Module
//!
//! Orchestrates a single analysis run from submission to completion against
//! the remote inference backend, classifies and formats whatever result it
//! receives, and serves the state to the browser front-end over HTTP + SSE.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chronoscan_common::events::EventBus;
use chronoscan_ui::config::UiConfig;
use chronoscan_ui::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting chronoscan-ui (Triage Console)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve configuration
    let config = UiConfig::load()?;
    info!("Upstream service: {}", config.upstream.base_url);

    // Step 2: Create event bus for SSE broadcasting
    let event_bus = EventBus::new(100);
    info!("Event bus initialized");

    // Step 3: Create application state (catalog, workflow, clients)
    let state = AppState::new(&config, event_bus);

    // Build router
    let app = chronoscan_ui::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
