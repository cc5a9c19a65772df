//! Risk classification engine
//!
//! Pure mapping from a raw analysis result to a risk bucket and the
//! profile's clinical grade label. Deterministic and idempotent; safe to
//! recompute on every render.

use crate::models::{AnalysisResult, CancerProfile, RiskLevel};
use serde::Serialize;

/// Upper bound of the LOW bucket (inclusive)
pub const RISK_LOW_MAX: f64 = 40.0;
/// Lower bound of the HIGH bucket (exclusive); also the upper bound of
/// MODERATE (inclusive)
pub const RISK_HIGH_MIN: f64 = 70.0;

/// Derived risk view of one analysis result; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub grade_label: String,
}

/// Bucket a score over the fixed thresholds
///
/// CRITICAL is never derived locally: above the high threshold the local
/// bucketing yields HIGH, and CRITICAL appears only when the service
/// supplies it explicitly.
pub fn risk_level_from_score(score: f64) -> RiskLevel {
    if score <= RISK_LOW_MAX {
        RiskLevel::Low
    } else if score <= RISK_HIGH_MIN {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Classify a result against its cancer profile
///
/// An explicit service-supplied `risk_level` is authoritative and is not
/// recomputed. The grade label is always read off the numeric score so the
/// tier stays aligned with the shared thresholds.
pub fn classify(result: &AnalysisResult, profile: &CancerProfile) -> Classification {
    let risk_level = result
        .risk_level
        .unwrap_or_else(|| risk_level_from_score(result.risk_score));

    let grading = &profile.grading;
    let grade_label = if result.risk_score <= grading.low_max {
        grading.low_label
    } else if result.risk_score <= grading.mid_max {
        grading.mid_label
    } else {
        grading.high_label
    };

    Classification {
        risk_level,
        grade_label: grade_label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CancerCatalog;

    fn result_with_score(score: f64) -> AnalysisResult {
        AnalysisResult {
            id: Some(1),
            cancer_type: "lung".to_string(),
            risk_score: score,
            risk_level: None,
            predicted_class: "malignant".to_string(),
            confidence: 88.0,
            patient: Default::default(),
            probabilities: None,
            simulated: false,
        }
    }

    #[test]
    fn bucket_boundaries_are_inclusive_low_exclusive_high() {
        assert_eq!(risk_level_from_score(0.0), RiskLevel::Low);
        assert_eq!(risk_level_from_score(40.0), RiskLevel::Low);
        assert_eq!(risk_level_from_score(40.1), RiskLevel::Moderate);
        assert_eq!(risk_level_from_score(70.0), RiskLevel::Moderate);
        assert_eq!(risk_level_from_score(70.1), RiskLevel::High);
        assert_eq!(risk_level_from_score(100.0), RiskLevel::High);
    }

    #[test]
    fn explicit_level_is_authoritative() {
        let catalog = CancerCatalog::new();
        let profile = catalog.get("lung").unwrap();

        // Score says LOW, service says CRITICAL: service wins.
        let mut result = result_with_score(12.0);
        result.risk_level = Some(RiskLevel::Critical);
        let classification = classify(&result, profile);
        assert_eq!(classification.risk_level, RiskLevel::Critical);
        // Grade tier still follows the score
        assert_eq!(classification.grade_label, "LungRADS 2");
    }

    #[test]
    fn classify_is_idempotent() {
        let catalog = CancerCatalog::new();
        let profile = catalog.get("brain").unwrap();
        let result = result_with_score(55.0);

        let first = classify(&result, profile);
        let second = classify(&result, profile);
        assert_eq!(first, second);
    }

    #[test]
    fn grade_tier_aligns_with_risk_bucket() {
        let catalog = CancerCatalog::new();
        let profile = catalog.get("lung").unwrap();

        let low = classify(&result_with_score(40.0), profile);
        assert_eq!(low.risk_level, RiskLevel::Low);
        assert_eq!(low.grade_label, "LungRADS 2");

        let moderate = classify(&result_with_score(55.0), profile);
        assert_eq!(moderate.risk_level, RiskLevel::Moderate);
        assert_eq!(moderate.grade_label, "LungRADS 3");

        let high = classify(&result_with_score(91.0), profile);
        assert_eq!(high.risk_level, RiskLevel::High);
        assert_eq!(high.grade_label, "LungRADS 4B");
    }
}
