//! Recommendation synthesizer tests

use chronoscan_ui::models::RiskLevel;
use chronoscan_ui::services::recommend;

const ALL_TYPES: [&str; 6] = ["lung", "brain", "breast", "blood", "bone", "skin"];

#[test]
fn always_exactly_four_items() {
    for cancer_type in ALL_TYPES {
        for level in [
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::Critical,
        ] {
            assert_eq!(recommend(cancer_type, level).len(), 4);
        }
    }
}

#[test]
fn category_order_is_fixed() {
    // action, treatment, prognosis/lab, follow-up
    for cancer_type in ALL_TYPES {
        let items = recommend(cancer_type, RiskLevel::Moderate);
        assert!(items[0].title.contains("Immediate Action"));
        assert!(items[1].title.contains("Treatment"));
        assert!(
            items[2].title.contains("Prognosis") || items[2].title.contains("Lab"),
            "third category must be prognosis or lab correlation for {cancer_type}"
        );
        assert!(items[3].title.contains("Follow-up"));
    }
}

#[test]
fn unknown_cancer_type_falls_back_to_lung() {
    let fallback = recommend("colon", RiskLevel::Critical);
    let lung = recommend("lung", RiskLevel::Critical);
    assert_eq!(fallback.len(), 4);
    for (a, b) in fallback.iter().zip(lung.iter()) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, b.description);
    }
}

#[test]
fn moderate_uses_routine_variant_high_uses_critical_variant() {
    for cancer_type in ALL_TYPES {
        let routine = recommend(cancer_type, RiskLevel::Moderate);
        let critical = recommend(cancer_type, RiskLevel::High);
        assert_ne!(
            routine[0].description, critical[0].description,
            "variants must differ for {cancer_type}"
        );
    }
}
