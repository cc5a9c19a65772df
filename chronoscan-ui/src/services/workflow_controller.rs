//! Analysis workflow controller
//!
//! Drives a single submission from IDLE to DONE:
//! IDLE → UPLOADING → ANALYZING → DONE, or
//! IDLE → UPLOADING → ANALYZING → FAILED_FALLBACK → DONE when the upstream
//! call fails.
//!
//! A locally driven progress ticker races the network call: it advances the
//! indicator monotonically up to a pre-completion ceiling and is cancelled
//! the moment a terminal state is reached, so a stale tick can never
//! overwrite a completed progress value. Upstream failure never surfaces to
//! the user; the controller completes with a simulated demo result flagged
//! as such.

use crate::config::WorkflowConfig;
use crate::error::TriageError;
use crate::models::{
    AnalysisInput, AnalysisResult, AnalysisSession, CancerCatalog, PatientInfo, RiskLevel,
    ScanType, WorkflowState,
};
use crate::services::InferenceClient;
use chrono::Utc;
use chronoscan_common::events::{ChronoscanEvent, EventBus};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Demo fallback values, mirrored from the result card's offline defaults
const FALLBACK_RISK_SCORE: f64 = 91.0;
const FALLBACK_CONFIDENCE: f64 = 91.0;
const FALLBACK_PREDICTED_CLASS: &str = "malignant";

/// Outcome of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Submission accepted and dispatched
    Started {
        submission_id: Uuid,
        started_at: chrono::DateTime<Utc>,
    },
    /// A submission is already in flight; the request was a no-op
    AlreadyInFlight { submission_id: Uuid },
}

/// State machine driver for the analysis workflow
///
/// Cheap to clone; all fields are shared handles. Exactly one submission is
/// in flight at a time, so the single RwLock is the only synchronization
/// needed.
#[derive(Clone)]
pub struct WorkflowController {
    session: Arc<RwLock<AnalysisSession>>,
    catalog: Arc<CancerCatalog>,
    client: Arc<InferenceClient>,
    event_bus: EventBus,
    config: WorkflowConfig,
}

impl WorkflowController {
    pub fn new(
        catalog: Arc<CancerCatalog>,
        client: Arc<InferenceClient>,
        event_bus: EventBus,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(AnalysisSession::idle())),
            catalog,
            client,
            event_bus,
            config,
        }
    }

    /// Start a new submission
    ///
    /// Resolves the cancer profile first: an unknown id aborts before any
    /// state change. While a submission is UPLOADING or ANALYZING the
    /// request is a no-op: state untouched, no duplicate network call.
    pub async fn start(&self, input: AnalysisInput) -> Result<StartOutcome, TriageError> {
        let scan_type = self.catalog.get(&input.cancer_type_id)?.scan_type;

        let (submission_id, started_at) = {
            let mut session = self.session.write().await;
            if session.state.is_in_flight() {
                tracing::debug!(
                    submission_id = %session.submission_id,
                    state = session.state.as_str(),
                    "Submission already in flight, ignoring start request"
                );
                return Ok(StartOutcome::AlreadyInFlight {
                    submission_id: session.submission_id,
                });
            }

            *session = AnalysisSession::begin(input.cancer_type_id.clone());
            let submission_id = session.submission_id;
            let started_at = session.started_at;

            tracing::info!(
                submission_id = %submission_id,
                cancer_type = %input.cancer_type_id,
                file = %input.file_name,
                "Starting analysis workflow"
            );

            self.event_bus.emit_lossy(ChronoscanEvent::AnalysisStarted {
                submission_id,
                cancer_type: input.cancer_type_id.clone(),
                timestamp: Utc::now(),
            });
            self.emit_state_change(submission_id, WorkflowState::Idle, WorkflowState::Uploading);

            (submission_id, started_at)
        };

        let cancel_token = CancellationToken::new();
        tokio::spawn(self.clone().run_ticker(submission_id, cancel_token.clone()));
        tokio::spawn(self.clone().run_submission(input, scan_type, submission_id, cancel_token));

        Ok(StartOutcome::Started {
            submission_id,
            started_at,
        })
    }

    /// New-file reset: from IDLE or DONE installs a fresh idle session and
    /// discards any previous result. Refused while a submission is in
    /// flight.
    pub async fn reset(&self) -> bool {
        let mut session = self.session.write().await;
        if session.state.is_in_flight() {
            return false;
        }
        tracing::debug!(
            submission_id = %session.submission_id,
            "Resetting workflow to IDLE"
        );
        // Fresh submission id: a late result for the old session no longer
        // matches and is dropped by the stale guard.
        *session = AnalysisSession::idle();
        true
    }

    /// Snapshot of the current session for status endpoints
    pub async fn snapshot(&self) -> AnalysisSession {
        self.session.read().await.clone()
    }

    /// The published result of the last completed submission, if any
    pub async fn current_result(&self) -> Option<AnalysisResult> {
        let session = self.session.read().await;
        if session.state == WorkflowState::Done {
            session.result.clone()
        } else {
            None
        }
    }

    /// Progress ticker: bridges perceived latency while the upstream call
    /// is outstanding. Monotonic, capped below completion, cancelled on any
    /// terminal state.
    async fn run_ticker(self, submission_id: Uuid, cancel_token: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.tick_interval());
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                _ = interval.tick() => {
                    let mut session = self.session.write().await;
                    if session.submission_id != submission_id || session.state.is_terminal() {
                        break;
                    }
                    if let Some(progress) =
                        session.advance_progress(self.config.tick_step, self.config.upload_ceiling)
                    {
                        self.event_bus.emit_lossy(ChronoscanEvent::AnalysisProgress {
                            submission_id,
                            state: session.state.as_str().to_string(),
                            progress,
                            message: match session.state {
                                WorkflowState::Uploading => "Uploading scan...".to_string(),
                                _ => "AI inference running...".to_string(),
                            },
                            timestamp: Utc::now(),
                        });
                    }
                }
            }
        }
    }

    /// Submission driver: dispatches the upstream call and applies its
    /// outcome, or the fallback when it fails.
    async fn run_submission(
        self,
        input: AnalysisInput,
        scan_type: ScanType,
        submission_id: Uuid,
        cancel_token: CancellationToken,
    ) {
        // ANALYZING represents "server is computing"; the transition lands
        // immediately after the call is dispatched.
        {
            let mut session = self.session.write().await;
            if session.submission_id != submission_id {
                cancel_token.cancel();
                return;
            }
            session.transition_to(WorkflowState::Analyzing);
        }
        self.emit_state_change(submission_id, WorkflowState::Uploading, WorkflowState::Analyzing);

        // Kept for the fallback result; the input itself is consumed here.
        let cancer_type = input.cancer_type_id.clone();
        let patient = input.patient.clone();

        match self.client.submit(&input, scan_type).await {
            Ok(result) => {
                self.complete(submission_id, &cancel_token, result).await;
            }
            Err(e) => {
                tracing::warn!(
                    submission_id = %submission_id,
                    error = %e,
                    "Analysis submission failed, engaging fallback"
                );
                self.fall_back(submission_id, &cancel_token, cancer_type, patient)
                    .await;
            }
        }
    }

    /// Apply a successful upstream result
    async fn complete(
        &self,
        submission_id: Uuid,
        cancel_token: &CancellationToken,
        result: AnalysisResult,
    ) {
        cancel_token.cancel();

        let mut session = self.session.write().await;
        // Stale guard: only the most recently started submission's result
        // is applied.
        if session.submission_id != submission_id {
            tracing::debug!(
                submission_id = %submission_id,
                "Dropping result for superseded submission"
            );
            return;
        }

        session.complete_progress();
        session.transition_to(WorkflowState::Done);
        let risk_score = result.risk_score;
        session.result = Some(result);
        drop(session);

        tracing::info!(
            submission_id = %submission_id,
            risk_score,
            "Analysis completed"
        );
        self.emit_state_change(submission_id, WorkflowState::Analyzing, WorkflowState::Done);
        self.event_bus.emit_lossy(ChronoscanEvent::AnalysisCompleted {
            submission_id,
            simulated: false,
            risk_score,
            timestamp: Utc::now(),
        });
    }

    /// Upstream failure path: FAILED_FALLBACK, then DONE with a simulated
    /// result after a short fixed delay. The demo must stay navigable when
    /// the backend is unavailable.
    async fn fall_back(
        &self,
        submission_id: Uuid,
        cancel_token: &CancellationToken,
        cancer_type: String,
        patient: PatientInfo,
    ) {
        cancel_token.cancel();

        {
            let mut session = self.session.write().await;
            if session.submission_id != submission_id {
                return;
            }
            session.complete_progress();
            session.transition_to(WorkflowState::FailedFallback);
        }
        self.emit_state_change(
            submission_id,
            WorkflowState::Analyzing,
            WorkflowState::FailedFallback,
        );

        tokio::time::sleep(self.config.fallback_delay()).await;

        let mut session = self.session.write().await;
        if session.submission_id != submission_id {
            return;
        }
        session.transition_to(WorkflowState::Done);
        session.result = Some(simulated_result(cancer_type, patient));
        drop(session);

        self.emit_state_change(
            submission_id,
            WorkflowState::FailedFallback,
            WorkflowState::Done,
        );
        self.event_bus.emit_lossy(ChronoscanEvent::AnalysisCompleted {
            submission_id,
            simulated: true,
            risk_score: FALLBACK_RISK_SCORE,
            timestamp: Utc::now(),
        });
    }

    fn emit_state_change(&self, submission_id: Uuid, old: WorkflowState, new: WorkflowState) {
        self.event_bus
            .emit_lossy(ChronoscanEvent::WorkflowStateChanged {
                submission_id,
                old_state: old.as_str().to_string(),
                new_state: new.as_str().to_string(),
                timestamp: Utc::now(),
            });
    }
}

/// Locally synthesized demo result used when the service is unreachable.
/// Internally distinguishable from a real result via `simulated`.
fn simulated_result(cancer_type: String, patient: PatientInfo) -> AnalysisResult {
    AnalysisResult {
        id: None,
        cancer_type,
        risk_score: FALLBACK_RISK_SCORE,
        risk_level: Some(RiskLevel::Critical),
        predicted_class: FALLBACK_PREDICTED_CLASS.to_string(),
        confidence: FALLBACK_CONFIDENCE,
        patient,
        probabilities: None,
        simulated: true,
    }
}
