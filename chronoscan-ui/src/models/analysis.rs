//! Analysis input and result types
//!
//! `AnalysisInput` is transient (consumed by the submission), the
//! `AnalysisResult` is immutable once received and owned by the session
//! until a new analysis starts or the user resets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Risk bucket derived from the numeric score (or supplied by the service)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// HIGH and CRITICAL select the critical recommendation variants
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

/// Optional patient context attached to a submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub age: Option<u32>,
}

/// CBC biomarkers; only meaningful for the blood profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Biomarkers {
    pub wbc: Option<f64>,
    pub blast: Option<f64>,
    pub hgb: Option<f64>,
    pub plt: Option<f64>,
}

impl Biomarkers {
    pub fn is_empty(&self) -> bool {
        self.wbc.is_none() && self.blast.is_none() && self.hgb.is_none() && self.plt.is_none()
    }
}

/// One submission's worth of user input; discarded after dispatch
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub cancer_type_id: String,
    pub patient: PatientInfo,
    pub biomarkers: Biomarkers,
}

/// Outcome of one analysis, remote or locally synthesized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Upstream prediction id; absent for locally synthesized results,
    /// which therefore never reach the remote report endpoint
    pub id: Option<i64>,
    pub cancer_type: String,
    /// Risk score in [0, 100]
    pub risk_score: f64,
    /// Explicit service-supplied level. When present it is authoritative
    /// and must not be recomputed from the score.
    pub risk_level: Option<RiskLevel>,
    pub predicted_class: String,
    /// Confidence in [0, 100]
    pub confidence: f64,
    #[serde(default)]
    pub patient: PatientInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<HashMap<String, f64>>,
    /// Provenance marker: true for the demo fallback result produced when
    /// the upstream service was unreachable
    #[serde(default)]
    pub simulated: bool,
}
