//! Navigation flow API handlers
//!
//! GET /flow, POST /flow/navigate: stage jumps and the render hints for
//! the progress diagram. Navigation is orthogonal to the in-flight
//! submission and never cancels it.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use chronoscan_common::events::ChronoscanEvent;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiResult,
    models::{Stage, StageStatus},
    AppState,
};

/// One node of the flow diagram
#[derive(Debug, Serialize)]
pub struct FlowNode {
    pub stage: Stage,
    pub order: u8,
    pub status: StageStatus,
}

/// GET /flow response
#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub current: Stage,
    pub nodes: Vec<FlowNode>,
}

/// POST /flow/navigate request
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub stage: Stage,
}

/// GET /flow
pub async fn flow_snapshot(State(state): State<AppState>) -> ApiResult<Json<FlowResponse>> {
    let flow = state.navigation.read().await;
    Ok(Json(render(&flow)))
}

/// POST /flow/navigate
///
/// Free jumps are allowed; this is not a strict gate.
pub async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> ApiResult<Json<FlowResponse>> {
    let mut flow = state.navigation.write().await;
    let previous = flow.navigate(request.stage);

    tracing::debug!(
        from = previous.as_str(),
        to = request.stage.as_str(),
        "Stage change"
    );
    state.event_bus.emit_lossy(ChronoscanEvent::StageChanged {
        from: previous.as_str().to_string(),
        to: request.stage.as_str().to_string(),
        timestamp: Utc::now(),
    });

    Ok(Json(render(&flow)))
}

fn render(flow: &crate::models::NavigationFlow) -> FlowResponse {
    FlowResponse {
        current: flow.current(),
        nodes: Stage::ALL
            .iter()
            .map(|&stage| FlowNode {
                stage,
                order: stage.order(),
                status: flow.status(stage),
            })
            .collect(),
    }
}

/// Build navigation routes
pub fn flow_routes() -> Router<AppState> {
    Router::new()
        .route("/flow", get(flow_snapshot))
        .route("/flow/navigate", post(navigate))
}
