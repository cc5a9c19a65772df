//! Remote report generation client
//!
//! Asks the backend to produce a structured clinical report for a stored
//! prediction. Failure here is never fatal: the caller keeps the locally
//! templated sections instead.

use crate::config::UpstreamConfig;
use crate::error::TriageError;
use crate::services::report_builder::StructuredReport;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct ReportClient {
    http_client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl ReportClient {
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

    /// Generate a report for an upstream prediction id
    pub async fn generate(&self, prediction_id: i64) -> Result<StructuredReport, TriageError> {
        let url = format!("{}/reports/generate/{}", self.base_url, prediction_id);
        debug!(prediction_id, "Requesting remote report generation");

        let mut request = self.http_client.post(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TriageError::ReportGenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TriageError::ReportGenerationFailed(format!(
                "Service returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TriageError::ReportGenerationFailed(format!("Malformed report: {e}")))
    }
}
