//! Upstream inference client
//!
//! Submits one analysis to the remote backend and converts the prediction
//! payload into an `AnalysisResult`. Two wire variants exist: pathology
//! submissions (blood) carry CBC biomarkers and no scan type, imaging
//! submissions carry cancer type + scan type and no biomarkers.

use crate::config::UpstreamConfig;
use crate::error::TriageError;
use crate::models::{AnalysisInput, AnalysisResult, RiskLevel, ScanType};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Prediction payload as returned by the backend
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    cancer_type: Option<String>,
    #[serde(default)]
    risk_score: f64,
    #[serde(default)]
    risk_level: Option<RiskLevel>,
    #[serde(default)]
    predicted_class: Option<String>,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    patient_id: Option<String>,
    #[serde(default)]
    patient_name: Option<String>,
    #[serde(default)]
    patient_age: Option<u32>,
    #[serde(default)]
    probabilities: Option<HashMap<String, f64>>,
}

/// Client for the analysis backend
pub struct InferenceClient {
    http_client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl InferenceClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    /// Submit one analysis
    ///
    /// Any transport or service error (timeouts included) maps to
    /// `SubmissionFailed`; the workflow controller recovers it via the
    /// fallback path.
    pub async fn submit(
        &self,
        input: &AnalysisInput,
        scan_type: ScanType,
    ) -> Result<AnalysisResult, TriageError> {
        let (endpoint, form) = if scan_type == ScanType::Pathology {
            ("pathology/analyze", self.pathology_form(input))
        } else {
            ("radiology/analyze", self.radiology_form(input, scan_type))
        };
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!(
            cancer_type = %input.cancer_type_id,
            file = %input.file_name,
            endpoint,
            "Dispatching analysis submission"
        );

        let mut request = self.http_client.post(&url).multipart(form);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TriageError::SubmissionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TriageError::SubmissionFailed(format!(
                "Service returned {}",
                response.status()
            )));
        }

        let prediction: PredictionResponse = response
            .json()
            .await
            .map_err(|e| TriageError::SubmissionFailed(format!("Malformed prediction: {e}")))?;

        Ok(self.build_result(prediction, input))
    }

    fn pathology_form(&self, input: &AnalysisInput) -> Form {
        let mut form = Form::new().part(
            "file",
            Part::bytes(input.file_bytes.clone()).file_name(input.file_name.clone()),
        );
        form = append_patient_fields(form, input);
        if let Some(wbc) = input.biomarkers.wbc {
            form = form.text("wbc", wbc.to_string());
        }
        if let Some(blast) = input.biomarkers.blast {
            form = form.text("blast", blast.to_string());
        }
        if let Some(hgb) = input.biomarkers.hgb {
            form = form.text("hgb", hgb.to_string());
        }
        if let Some(plt) = input.biomarkers.plt {
            form = form.text("plt", plt.to_string());
        }
        form
    }

    fn radiology_form(&self, input: &AnalysisInput, scan_type: ScanType) -> Form {
        let form = Form::new()
            .part(
                "file",
                Part::bytes(input.file_bytes.clone()).file_name(input.file_name.clone()),
            )
            .text("cancer_type", input.cancer_type_id.clone())
            .text("scan_type", scan_type.as_str());
        append_patient_fields(form, input)
    }

    fn build_result(&self, prediction: PredictionResponse, input: &AnalysisInput) -> AnalysisResult {
        AnalysisResult {
            id: prediction.id,
            cancer_type: prediction
                .cancer_type
                .unwrap_or_else(|| input.cancer_type_id.clone()),
            // Invariant: risk score stays in [0, 100] whatever the wire said
            risk_score: prediction.risk_score.clamp(0.0, 100.0),
            risk_level: prediction.risk_level,
            predicted_class: prediction
                .predicted_class
                .unwrap_or_else(|| "unknown".to_string()),
            confidence: prediction.confidence.clamp(0.0, 100.0),
            patient: crate::models::PatientInfo {
                id: prediction.patient_id.or_else(|| input.patient.id.clone()),
                name: prediction.patient_name.or_else(|| input.patient.name.clone()),
                age: prediction.patient_age.or(input.patient.age),
            },
            probabilities: prediction.probabilities,
            simulated: false,
        }
    }
}

fn append_patient_fields(mut form: Form, input: &AnalysisInput) -> Form {
    if let Some(id) = &input.patient.id {
        form = form.text("patient_id", id.clone());
    }
    if let Some(name) = &input.patient.name {
        form = form.text("patient_name", name.clone());
    }
    if let Some(age) = input.patient.age {
        form = form.text("patient_age", age.to_string());
    }
    form
}
