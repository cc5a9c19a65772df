//! Recommendation synthesizer
//!
//! A fixed lookup table keyed by cancer type yields four category templates
//! (action, treatment, prognosis/lab, follow-up). Each template carries two
//! text variants; HIGH or CRITICAL risk selects the critical variant. An
//! unknown cancer type falls back to the lung table rather than failing so
//! the result card always renders.

use crate::models::RiskLevel;
use serde::Serialize;

/// One rendered recommendation card
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub color_tag: &'static str,
}

struct CategoryTemplate {
    icon: &'static str,
    title: &'static str,
    color_tag: &'static str,
    critical: &'static str,
    routine: &'static str,
}

struct RecommendationTable {
    cancer_type: &'static str,
    categories: [CategoryTemplate; 4],
}

const CATEGORY_COLORS: [&str; 4] = ["#ff4444", "#ff8c00", "#c084fc", "#00b4ff"];

static TABLES: &[RecommendationTable] = &[
    RecommendationTable {
        cancer_type: "lung",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Schedule PET-CT scan within 7 days. Refer to thoracic oncologist. Consider CT-guided biopsy.",
                routine: "Continue annual low-dose CT screening. No urgent intervention indicated.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Stage IIB protocol. Lobectomy + adjuvant chemotherapy. Pembrolizumab if PD-L1 > 50%.",
                routine: "No treatment indicated at current risk. Reassess at next screening interval.",
            },
            CategoryTemplate {
                icon: "📊",
                title: "Survival Prognosis",
                color_tag: CATEGORY_COLORS[2],
                critical: "1yr: 74% · 3yr: 48% · 5yr: 31% with treatment. Stage-adjusted Cox model confidence: 89%.",
                routine: "5-year survival > 95% for findings in this risk band.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up Imaging",
                color_tag: CATEGORY_COLORS[3],
                critical: "Nodule volume +38% vs. prior scan. VDT: 142 days. RECIST: Progressive Disease.",
                routine: "Repeat low-dose CT in 12 months.",
            },
        ],
    },
    RecommendationTable {
        cancer_type: "brain",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Neurosurgical referral within 72 hours. Contrast-enhanced MRI with spectroscopy. Assess mass effect and midline shift.",
                routine: "No urgent intervention indicated. Discuss incidental finding at next neurology visit.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Maximal safe resection. Radiotherapy + temozolomide per Stupp protocol if high grade is confirmed.",
                routine: "Observation preferred for low-grade findings. Surgical consult only on progression.",
            },
            CategoryTemplate {
                icon: "📊",
                title: "Survival Prognosis",
                color_tag: CATEGORY_COLORS[2],
                critical: "Median survival 14-16 months for high-grade glioma on full protocol. MGMT methylation improves response.",
                routine: "Long-term survival > 90% for benign or low-grade lesions.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up Imaging",
                color_tag: CATEGORY_COLORS[3],
                critical: "MRI every 8-12 weeks post-treatment. Monitor enhancement pattern and perilesional edema.",
                routine: "Surveillance MRI in 6-12 months.",
            },
        ],
    },
    RecommendationTable {
        cancer_type: "breast",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Diagnostic mammography + targeted ultrasound within 7 days. Core needle biopsy of the index lesion.",
                routine: "Continue routine screening mammography. No additional workup indicated.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Receptor panel (ER/PR/HER2) on biopsy. Surgery per staging; adjuvant therapy by subtype.",
                routine: "No treatment indicated. Risk-based screening interval applies.",
            },
            CategoryTemplate {
                icon: "📊",
                title: "Survival Prognosis",
                color_tag: CATEGORY_COLORS[2],
                critical: "5-year survival 85-99% when treated at early stage. Subtype and nodal status dominate the estimate.",
                routine: "5-year survival > 99% at current risk level.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up Imaging",
                color_tag: CATEGORY_COLORS[3],
                critical: "Short-interval (6 month) diagnostic follow-up of the index lesion after workup.",
                routine: "Annual screening mammography.",
            },
        ],
    },
    RecommendationTable {
        cancer_type: "blood",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Urgent hematology referral. Confirmatory peripheral smear review and flow cytometry within 48 hours.",
                routine: "No urgent action. Repeat CBC at next routine visit.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Bone marrow aspirate for lineage confirmation. Induction protocol selection follows cytogenetics.",
                routine: "No treatment indicated. Monitor counts at routine intervals.",
            },
            CategoryTemplate {
                icon: "🧪",
                title: "Lab Correlation (CBC)",
                color_tag: CATEGORY_COLORS[2],
                critical: "Correlate blast percentage with WBC and platelet trends. Cytopenias support marrow involvement.",
                routine: "CBC values within expected range. No cytopenia pattern detected.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up",
                color_tag: CATEGORY_COLORS[3],
                critical: "Repeat CBC with differential weekly until hematology review.",
                routine: "Repeat CBC in 6-12 months.",
            },
        ],
    },
    RecommendationTable {
        cancer_type: "bone",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Orthopedic oncology referral within 7 days. CT chest for staging. Plan image-guided biopsy.",
                routine: "No urgent intervention. Correlate with symptoms at next visit.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Neoadjuvant chemotherapy + limb-salvage resection per sarcoma protocol.",
                routine: "Benign-appearing lesion. Treatment not indicated.",
            },
            CategoryTemplate {
                icon: "📊",
                title: "Survival Prognosis",
                color_tag: CATEGORY_COLORS[2],
                critical: "5-year survival 60-70% for localized high-grade disease on full protocol.",
                routine: "Excellent prognosis; aggressive radiographic features absent.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up Imaging",
                color_tag: CATEGORY_COLORS[3],
                critical: "Repeat radiograph + MRI in 6-8 weeks to assess progression.",
                routine: "Repeat radiograph in 6 months if symptomatic.",
            },
        ],
    },
    RecommendationTable {
        cancer_type: "skin",
        categories: [
            CategoryTemplate {
                icon: "⚡",
                title: "Immediate Action Required",
                color_tag: CATEGORY_COLORS[0],
                critical: "Dermatology referral within 7 days. Excisional biopsy with 1-3mm margins of the index lesion.",
                routine: "Routine skin surveillance. Photograph the lesion for comparison.",
            },
            CategoryTemplate {
                icon: "💊",
                title: "Treatment Pathway",
                color_tag: CATEGORY_COLORS[1],
                critical: "Wide local excision per Breslow depth. Sentinel node biopsy if depth > 0.8mm.",
                routine: "No excision indicated at current risk.",
            },
            CategoryTemplate {
                icon: "📊",
                title: "Survival Prognosis",
                color_tag: CATEGORY_COLORS[2],
                critical: "5-year survival 60-95% depending on depth and ulceration.",
                routine: "5-year survival > 98% for lesions in this band.",
            },
            CategoryTemplate {
                icon: "🔄",
                title: "Follow-up",
                color_tag: CATEGORY_COLORS[3],
                critical: "Full-body skin exam every 3 months for 2 years.",
                routine: "Annual full-body skin exam.",
            },
        ],
    },
];

/// Build the four recommendation cards for a cancer type and risk level
///
/// Output order is fixed (action, treatment, prognosis/lab, follow-up) and
/// the length is always exactly 4.
pub fn recommend(cancer_type_id: &str, risk_level: RiskLevel) -> Vec<RecommendationItem> {
    let table = TABLES
        .iter()
        .find(|t| t.cancer_type == cancer_type_id)
        .unwrap_or_else(|| {
            tracing::warn!(
                cancer_type = cancer_type_id,
                "No recommendation table for cancer type, using lung table"
            );
            &TABLES[0]
        });

    table
        .categories
        .iter()
        .map(|category| RecommendationItem {
            icon: category.icon,
            title: category.title,
            description: if risk_level.is_elevated() {
                category.critical
            } else {
                category.routine
            },
            color_tag: category.color_tag,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_four_categories_in_fixed_order() {
        for table in TABLES {
            let items = recommend(table.cancer_type, RiskLevel::Low);
            assert_eq!(items.len(), 4);
            assert!(items[0].title.starts_with("Immediate Action"));
            assert!(items[1].title.starts_with("Treatment"));
            assert!(items[3].title.starts_with("Follow-up"));
        }
    }

    #[test]
    fn unknown_type_falls_back_to_lung() {
        let items = recommend("pancreas", RiskLevel::High);
        let lung = recommend("lung", RiskLevel::High);
        assert_eq!(items.len(), 4);
        for (item, expected) in items.iter().zip(lung.iter()) {
            assert_eq!(item.description, expected.description);
        }
    }

    #[test]
    fn high_and_critical_select_the_critical_variant() {
        let routine = recommend("blood", RiskLevel::Low);
        let high = recommend("blood", RiskLevel::High);
        let critical = recommend("blood", RiskLevel::Critical);

        assert_ne!(routine[0].description, high[0].description);
        assert_eq!(high[0].description, critical[0].description);
    }
}
