//! Risk classification tests
//!
//! Threshold sweep, idempotence, and the explicit-level override across
//! the catalog.

use chronoscan_ui::models::{AnalysisResult, CancerCatalog, RiskLevel};
use chronoscan_ui::services::{classify, risk_classifier::risk_level_from_score};

fn result(cancer_type: &str, score: f64) -> AnalysisResult {
    AnalysisResult {
        id: Some(1),
        cancer_type: cancer_type.to_string(),
        risk_score: score,
        risk_level: None,
        predicted_class: "malignant".to_string(),
        confidence: 90.0,
        patient: Default::default(),
        probabilities: None,
        simulated: false,
    }
}

#[test]
fn full_integer_sweep_matches_the_buckets() {
    for score in 0..=100u32 {
        let level = risk_level_from_score(score as f64);
        let expected = if score <= 40 {
            RiskLevel::Low
        } else if score <= 70 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        };
        assert_eq!(level, expected, "score {score} bucketed wrong");
    }
}

#[test]
fn critical_is_never_derived_locally() {
    for score in [70.1, 85.0, 99.9, 100.0] {
        assert_eq!(risk_level_from_score(score), RiskLevel::High);
    }
}

#[test]
fn explicit_service_level_wins_over_the_score() {
    let catalog = CancerCatalog::new();
    let profile = catalog.get("lung").unwrap();

    let mut r = result("lung", 91.0);
    r.risk_level = Some(RiskLevel::Critical);
    assert_eq!(classify(&r, profile).risk_level, RiskLevel::Critical);

    // Even a downgrade is honored: explicit means authoritative
    let mut r = result("lung", 91.0);
    r.risk_level = Some(RiskLevel::Low);
    assert_eq!(classify(&r, profile).risk_level, RiskLevel::Low);
}

#[test]
fn classify_is_idempotent_across_the_catalog() {
    let catalog = CancerCatalog::new();
    for profile in catalog.profiles() {
        let r = result(profile.id, 66.6);
        let first = classify(&r, profile);
        let second = classify(&r, profile);
        assert_eq!(first, second);
    }
}

#[test]
fn grade_labels_follow_the_score_tier() {
    let catalog = CancerCatalog::new();
    let blood = catalog.get("blood").unwrap();

    assert_eq!(classify(&result("blood", 22.0), blood).grade_label, "Blast < 5%");
    assert_eq!(classify(&result("blood", 55.0), blood).grade_label, "Blast 5-19%");
    assert_eq!(classify(&result("blood", 88.0), blood).grade_label, "Blast >= 20%");
}
