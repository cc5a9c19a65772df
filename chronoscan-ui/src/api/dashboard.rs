//! Dashboard API handlers
//!
//! Advisory reads only: aggregate stats and the recent-predictions
//! worklist. Upstream absence degrades to fixed defaults inside the
//! client; these handlers never fail.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    services::{DashboardStats, RecentPrediction},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// GET /dashboard/stats
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.dashboard_client.stats().await)
}

/// GET /dashboard/recent?limit=N
pub async fn recent_predictions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<RecentPrediction>> {
    Json(state.dashboard_client.recent(query.limit).await)
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/dashboard/recent", get(recent_predictions))
}
