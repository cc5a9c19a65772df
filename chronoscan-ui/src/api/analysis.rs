//! Analysis workflow API handlers
//!
//! POST /analysis, GET /analysis/status, POST /analysis/reset,
//! GET /analysis/result, GET /analysis/report

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{AnalysisInput, AnalysisResult, Biomarkers, PatientInfo, WorkflowState},
    services::{classify, recommend, synthesize, Classification, RecommendationItem, ReportSection,
        StartOutcome},
    AppState,
};

/// POST /analysis response
#[derive(Debug, Serialize)]
pub struct StartAnalysisResponse {
    pub submission_id: Uuid,
    pub state: WorkflowState,
    pub started_at: DateTime<Utc>,
}

/// GET /analysis/status response
#[derive(Debug, Serialize)]
pub struct AnalysisStatusResponse {
    pub submission_id: Uuid,
    pub state: WorkflowState,
    pub progress: u8,
    pub cancer_type: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub has_result: bool,
}

/// GET /analysis/result response
#[derive(Debug, Serialize)]
pub struct AnalysisResultResponse {
    pub result: AnalysisResult,
    pub classification: Classification,
    pub recommendations: Vec<RecommendationItem>,
}

/// GET /analysis/report response
#[derive(Debug, Serialize)]
pub struct AnalysisReportResponse {
    pub sections: Vec<ReportSection>,
    pub generated_by: String,
}

/// POST /analysis
///
/// Multipart submission: file plus cancer_type, patient fields, and (for
/// blood) CBC biomarkers. Returns 409 when a submission is already in
/// flight; the controller treats the request as a no-op.
pub async fn start_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<StartAnalysisResponse>> {
    let input = parse_submission(multipart).await?;

    match state.workflow.start(input).await? {
        StartOutcome::Started {
            submission_id,
            started_at,
        } => Ok(Json(StartAnalysisResponse {
            submission_id,
            state: WorkflowState::Uploading,
            started_at,
        })),
        StartOutcome::AlreadyInFlight { submission_id } => Err(ApiError::Conflict(format!(
            "Submission {submission_id} already in flight"
        ))),
    }
}

/// GET /analysis/status
pub async fn analysis_status(
    State(state): State<AppState>,
) -> ApiResult<Json<AnalysisStatusResponse>> {
    let session = state.workflow.snapshot().await;
    Ok(Json(AnalysisStatusResponse {
        submission_id: session.submission_id,
        state: session.state,
        progress: session.progress,
        cancer_type: session.cancer_type,
        started_at: session.started_at,
        ended_at: session.ended_at,
        has_result: session.result.is_some(),
    }))
}

/// POST /analysis/reset
///
/// Selecting a new file discards the previous result. Refused (409) while
/// a submission is in flight.
pub async fn reset_analysis(
    State(state): State<AppState>,
) -> ApiResult<Json<AnalysisStatusResponse>> {
    if !state.workflow.reset().await {
        return Err(ApiError::Conflict(
            "Cannot reset while a submission is in flight".to_string(),
        ));
    }
    analysis_status(State(state)).await
}

/// GET /analysis/result
///
/// Classification and recommendations are recomputed from the stored
/// result on every call; they are never persisted.
pub async fn analysis_result(
    State(state): State<AppState>,
) -> ApiResult<Json<AnalysisResultResponse>> {
    let result = state
        .workflow
        .current_result()
        .await
        .ok_or_else(|| ApiError::NotFound("No completed analysis result".to_string()))?;

    let profile = state.catalog.get(&result.cancer_type)?;
    let classification = classify(&result, profile);
    let recommendations = recommend(&result.cancer_type, classification.risk_level);

    Ok(Json(AnalysisResultResponse {
        classification,
        recommendations,
        result,
    }))
}

/// GET /analysis/report
///
/// Prefers the remote-generated report; any failure there keeps the local
/// templated sections. Simulated results never hit the remote service.
pub async fn analysis_report(
    State(state): State<AppState>,
) -> ApiResult<Json<AnalysisReportResponse>> {
    let result = state
        .workflow
        .current_result()
        .await
        .ok_or_else(|| ApiError::NotFound("No completed analysis result".to_string()))?;

    let profile = state.catalog.get(&result.cancer_type)?;
    let classification = classify(&result, profile);

    let remote = match (result.id, result.simulated) {
        (Some(id), false) => match state.report_client.generate(id).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(error = %e, "Remote report unavailable, keeping templated sections");
                None
            }
        },
        _ => None,
    };

    let generated_by = remote
        .as_ref()
        .map(|r| r.generated_by.clone())
        .unwrap_or_else(|| "local_template".to_string());
    let sections = synthesize(&result, &classification, remote.as_ref());

    Ok(Json(AnalysisReportResponse {
        sections,
        generated_by,
    }))
}

/// Parse the multipart submission into an `AnalysisInput`
async fn parse_submission(mut multipart: Multipart) -> ApiResult<AnalysisInput> {
    let mut file_name = None;
    let mut file_bytes = None;
    let mut cancer_type = None;
    let mut patient = PatientInfo::default();
    let mut biomarkers = Biomarkers::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file_name = Some(
                    field
                        .file_name()
                        .unwrap_or("upload.bin")
                        .to_string(),
                );
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?
                        .to_vec(),
                );
            }
            "cancer_type" => cancer_type = Some(read_text(field).await?),
            "patient_id" => patient.id = Some(read_text(field).await?),
            "patient_name" => patient.name = Some(read_text(field).await?),
            "patient_age" => patient.age = read_text(field).await?.parse().ok(),
            "wbc" => biomarkers.wbc = read_text(field).await?.parse().ok(),
            "blast" => biomarkers.blast = read_text(field).await?.parse().ok(),
            "hgb" => biomarkers.hgb = read_text(field).await?.parse().ok(),
            "plt" => biomarkers.plt = read_text(field).await?.parse().ok(),
            _ => {}
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;
    let cancer_type =
        cancer_type.ok_or_else(|| ApiError::BadRequest("Missing cancer_type field".to_string()))?;

    Ok(AnalysisInput {
        file_name: file_name.unwrap_or_else(|| "upload.bin".to_string()),
        file_bytes,
        cancer_type_id: cancer_type,
        patient,
        biomarkers,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed field: {e}")))
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(start_analysis))
        .route("/analysis/status", get(analysis_status))
        .route("/analysis/reset", post(reset_analysis))
        .route("/analysis/result", get(analysis_result))
        .route("/analysis/report", get(analysis_report))
}
