//! Decision/workflow services and upstream clients

pub mod dashboard_client;
pub mod inference_client;
pub mod recommendation;
pub mod report_builder;
pub mod report_client;
pub mod risk_classifier;
pub mod workflow_controller;

pub use dashboard_client::{DashboardClient, DashboardStats, RecentPrediction};
pub use inference_client::InferenceClient;
pub use recommendation::{recommend, RecommendationItem};
pub use report_builder::{synthesize, ReportSection, StructuredReport};
pub use report_client::ReportClient;
pub use risk_classifier::{classify, Classification};
pub use workflow_controller::{StartOutcome, WorkflowController};
