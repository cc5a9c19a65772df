//! Data model for the triage console

pub mod analysis;
pub mod catalog;
pub mod navigation;
pub mod session;

pub use analysis::{AnalysisInput, AnalysisResult, Biomarkers, PatientInfo, RiskLevel};
pub use catalog::{CancerCatalog, CancerProfile, GradeScale, ScanType};
pub use navigation::{NavigationFlow, Stage, StageStatus};
pub use session::{AnalysisSession, StateTransition, WorkflowState};
