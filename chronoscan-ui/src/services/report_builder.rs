//! Report section synthesizer
//!
//! Builds the ordered narrative document for the result card. A remote
//! structured report, when present, is rendered verbatim in its own section
//! order; otherwise four templated defaults are derived from the
//! classification. This function never fails: remote absence always
//! degrades to the default path.

use crate::models::{AnalysisResult, RiskLevel};
use crate::services::risk_classifier::Classification;
use serde::{Deserialize, Serialize};

/// Demo patient age used when the submission carried none
const DEFAULT_PATIENT_AGE: u32 = 54;

/// One labeled narrative section
#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub label: String,
    pub text: String,
}

/// Report payload returned by the remote generation service
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredReport {
    /// Section map in the remote's own key order
    #[serde(default)]
    pub sections: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub generated_by: String,
}

/// Build the section list for a result
///
/// Remote keys become uppercase labels with underscores turned into spaces;
/// section texts are used verbatim. Without a usable remote report the four
/// default sections are synthesized in fixed order.
pub fn synthesize(
    result: &AnalysisResult,
    classification: &Classification,
    remote: Option<&StructuredReport>,
) -> Vec<ReportSection> {
    if let Some(report) = remote {
        if !report.sections.is_empty() {
            return report
                .sections
                .iter()
                .map(|(key, value)| ReportSection {
                    label: key.to_uppercase().replace('_', " "),
                    text: match value.as_str() {
                        Some(text) => text.to_string(),
                        None => value.to_string(),
                    },
                })
                .collect();
        }
    }

    default_sections(result, classification)
}

fn default_sections(result: &AnalysisResult, classification: &Classification) -> Vec<ReportSection> {
    let age = result.patient.age.unwrap_or(DEFAULT_PATIENT_AGE);
    let predicted = if result.predicted_class.is_empty() {
        "unknown"
    } else {
        result.predicted_class.as_str()
    };

    let recommendation = if classification.risk_level == RiskLevel::Critical {
        "1. Specialist referral. 2. Additional imaging. 3. Consider biopsy. \
         4. Molecular profiling if confirmed."
            .to_string()
    } else {
        "Routine screening.".to_string()
    };

    vec![
        ReportSection {
            label: "CLINICAL INDICATION".to_string(),
            text: format!(
                "{age}-year-old presenting for {} cancer screening. AI-assisted analysis requested.",
                result.cancer_type
            ),
        },
        ReportSection {
            label: "FINDINGS".to_string(),
            text: format!(
                "{predicted} detected with {:.0}% confidence. Risk score: {:.0}%.",
                result.confidence, result.risk_score
            ),
        },
        ReportSection {
            label: "IMPRESSION".to_string(),
            text: format!(
                "{predicted} detected. Risk level: {}. Clinical correlation recommended.",
                classification.risk_level.as_str()
            ),
        },
        ReportSection {
            label: "RECOMMENDATION".to_string(),
            text: recommendation,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientInfo;

    fn result(cancer_type: &str, score: f64) -> AnalysisResult {
        AnalysisResult {
            id: Some(7),
            cancer_type: cancer_type.to_string(),
            risk_score: score,
            risk_level: None,
            predicted_class: "malignant".to_string(),
            confidence: 91.0,
            patient: PatientInfo {
                id: Some("PT-0041".to_string()),
                name: Some("Ananya Sharma".to_string()),
                age: Some(54),
            },
            probabilities: None,
            simulated: false,
        }
    }

    fn classification(level: RiskLevel) -> Classification {
        Classification {
            risk_level: level,
            grade_label: "LungRADS 4B".to_string(),
        }
    }

    #[test]
    fn default_sections_are_exactly_four_in_order() {
        let sections = synthesize(&result("lung", 91.0), &classification(RiskLevel::High), None);
        let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["CLINICAL INDICATION", "FINDINGS", "IMPRESSION", "RECOMMENDATION"]
        );
    }

    #[test]
    fn critical_recommendation_is_the_escalation_plan() {
        let sections = synthesize(
            &result("lung", 91.0),
            &classification(RiskLevel::Critical),
            None,
        );
        assert!(sections[3].text.starts_with("1. Specialist referral."));
    }

    #[test]
    fn non_critical_recommendation_is_routine_screening() {
        let sections = synthesize(&result("blood", 22.0), &classification(RiskLevel::Low), None);
        assert_eq!(sections[3].text, "Routine screening.");
    }

    #[test]
    fn remote_sections_win_and_keep_their_order() {
        let mut sections = serde_json::Map::new();
        sections.insert(
            "executive_summary".to_string(),
            serde_json::Value::String("Summary text.".to_string()),
        );
        sections.insert(
            "risk_assessment".to_string(),
            serde_json::Value::String("Risk text.".to_string()),
        );
        let remote = StructuredReport {
            sections,
            generated_by: "gemini".to_string(),
        };

        let out = synthesize(
            &result("lung", 91.0),
            &classification(RiskLevel::High),
            Some(&remote),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, "EXECUTIVE SUMMARY");
        assert_eq!(out[0].text, "Summary text.");
        assert_eq!(out[1].label, "RISK ASSESSMENT");
    }

    #[test]
    fn empty_remote_map_degrades_to_defaults() {
        let remote = StructuredReport {
            sections: serde_json::Map::new(),
            generated_by: "rule_based".to_string(),
        };
        let out = synthesize(
            &result("lung", 30.0),
            &classification(RiskLevel::Low),
            Some(&remote),
        );
        assert_eq!(out.len(), 4);
    }
}
