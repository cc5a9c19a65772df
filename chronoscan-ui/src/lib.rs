//! chronoscan-ui library interface
//!
//! Presentation-orchestration module of the ChronoScan triage demo: owns
//! the analysis workflow controller, the risk/recommendation/report rule
//! engines, the stage navigation flow, and the HTTP + SSE surface through
//! which a browser front-end drives them.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult, TriageError};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::UiConfig;
use crate::models::{CancerCatalog, NavigationFlow};
use crate::services::{DashboardClient, InferenceClient, ReportClient, WorkflowController};
use chronoscan_common::events::EventBus;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only cancer type catalog, built once at startup
    pub catalog: Arc<CancerCatalog>,
    /// Single-submission workflow controller
    pub workflow: WorkflowController,
    /// Session-scoped navigation state
    pub navigation: Arc<RwLock<NavigationFlow>>,
    /// Remote report generation client
    pub report_client: Arc<ReportClient>,
    /// Advisory dashboard reads
    pub dashboard_client: Arc<DashboardClient>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &UiConfig, event_bus: EventBus) -> Self {
        let catalog = Arc::new(CancerCatalog::new());
        let inference_client = Arc::new(InferenceClient::new(&config.upstream));
        let workflow = WorkflowController::new(
            catalog.clone(),
            inference_client,
            event_bus.clone(),
            config.workflow,
        );

        Self {
            catalog,
            workflow,
            navigation: Arc::new(RwLock::new(NavigationFlow::new())),
            report_client: Arc::new(ReportClient::new(&config.upstream)),
            dashboard_client: Arc::new(DashboardClient::new(&config.upstream)),
            event_bus,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::analysis_routes())
        .merge(api::flow_routes())
        .merge(api::dashboard_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
