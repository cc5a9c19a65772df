//! Cancer type catalog
//!
//! Static reference data for the six supported cancer types. The catalog is
//! built once at startup and injected read-only into every component that
//! needs profile metadata; an id outside the catalog is fatal for the
//! request that carried it.

use crate::error::TriageError;
use serde::Serialize;

/// Modality the upstream service expects for a given cancer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Ct,
    Mri,
    Xray,
    /// Blood slide microscopy; routed to the pathology endpoint
    Pathology,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Ct => "ct",
            ScanType::Mri => "mri",
            ScanType::Xray => "xray",
            ScanType::Pathology => "pathology",
        }
    }
}

/// Three-tier clinical grading scale over the shared risk thresholds
#[derive(Debug, Clone, Serialize)]
pub struct GradeScale {
    /// Upper bound of the low tier (inclusive)
    pub low_max: f64,
    /// Upper bound of the mid tier (inclusive)
    pub mid_max: f64,
    pub low_label: &'static str,
    pub mid_label: &'static str,
    pub high_label: &'static str,
}

/// Static descriptor of a supported cancer type
#[derive(Debug, Clone, Serialize)]
pub struct CancerProfile {
    /// Stable id used on the wire ("lung", "brain", ...)
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Model descriptor shown in the pipeline diagram
    pub model_descriptor: &'static str,
    pub scan_type: ScanType,
    pub grading: GradeScale,
    /// Display color (hex)
    pub color: &'static str,
}

/// Read-only lookup table of cancer profiles
///
/// Constructed once at process start and shared via `Arc`; never mutated.
pub struct CancerCatalog {
    profiles: Vec<CancerProfile>,
}

impl CancerCatalog {
    pub fn new() -> Self {
        let grade = |low: &'static str, mid: &'static str, high: &'static str| GradeScale {
            low_max: crate::services::risk_classifier::RISK_LOW_MAX,
            mid_max: crate::services::risk_classifier::RISK_HIGH_MIN,
            low_label: low,
            mid_label: mid,
            high_label: high,
        };

        Self {
            profiles: vec![
                CancerProfile {
                    id: "lung",
                    label: "Lung",
                    model_descriptor: "DenseNet121 + 3D-CNN",
                    scan_type: ScanType::Ct,
                    grading: grade("LungRADS 2", "LungRADS 3", "LungRADS 4B"),
                    color: "#00ff88",
                },
                CancerProfile {
                    id: "brain",
                    label: "Brain",
                    model_descriptor: "3D-UNet + ResNet50",
                    scan_type: ScanType::Mri,
                    grading: grade("WHO Grade I", "WHO Grade II", "WHO Grade IV"),
                    color: "#00b4ff",
                },
                CancerProfile {
                    id: "breast",
                    label: "Breast",
                    model_descriptor: "EfficientNetV2",
                    scan_type: ScanType::Xray,
                    grading: grade("BI-RADS 2", "BI-RADS 4A", "BI-RADS 5"),
                    color: "#ff6b9d",
                },
                CancerProfile {
                    id: "blood",
                    label: "Blood",
                    model_descriptor: "EfficientNetB3 + XGBoost",
                    scan_type: ScanType::Pathology,
                    grading: grade("Blast < 5%", "Blast 5-19%", "Blast >= 20%"),
                    color: "#ff4444",
                },
                CancerProfile {
                    id: "bone",
                    label: "Bone",
                    model_descriptor: "EfficientNetB4",
                    scan_type: ScanType::Ct,
                    grading: grade("Lodwick IA", "Lodwick II", "Lodwick III"),
                    color: "#ffd93d",
                },
                CancerProfile {
                    id: "skin",
                    label: "Skin",
                    model_descriptor: "EfficientNetV2 + ABCDE",
                    scan_type: ScanType::Xray,
                    grading: grade("Breslow < 0.8mm", "Breslow 0.8-2.0mm", "Breslow > 2.0mm"),
                    color: "#ff8c00",
                },
            ],
        }
    }

    /// Look up a profile by id
    ///
    /// Fails with `UnknownProfile` for ids outside the six supported types.
    /// Callers must treat this as fatal for the request, not retryable.
    pub fn get(&self, id: &str) -> Result<&CancerProfile, TriageError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| TriageError::UnknownProfile(id.to_string()))
    }

    /// All profiles in display order
    pub fn profiles(&self) -> &[CancerProfile] {
        &self.profiles
    }
}

impl Default for CancerCatalog {
    fn default() -> Self {
        Self::new()
    }
}
