//! Analysis workflow state machine
//!
//! One submission progresses IDLE → UPLOADING → ANALYZING → DONE, with
//! FAILED_FALLBACK interposed before DONE when the upstream call fails.

use crate::models::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of the current submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    /// Waiting for a file
    Idle,
    /// Client-side transmission; progress indicator runs locally
    Uploading,
    /// Upstream service is computing
    Analyzing,
    /// Result available (real or simulated)
    Done,
    /// Upstream failure absorbed; a simulated result is on its way
    FailedFallback,
}

impl WorkflowState {
    /// A submission request in these states must be a no-op
    pub fn is_in_flight(&self) -> bool {
        matches!(self, WorkflowState::Uploading | WorkflowState::Analyzing)
    }

    /// Terminal states stop the progress ticker
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Done | WorkflowState::FailedFallback)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "IDLE",
            WorkflowState::Uploading => "UPLOADING",
            WorkflowState::Analyzing => "ANALYZING",
            WorkflowState::Done => "DONE",
            WorkflowState::FailedFallback => "FAILED_FALLBACK",
        }
    }
}

/// State transition record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    pub submission_id: Uuid,
    pub old_state: WorkflowState,
    pub new_state: WorkflowState,
    pub transitioned_at: DateTime<Utc>,
}

/// In-memory state of the current (or most recent) submission
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSession {
    /// Identifier of this submission; a fresh id per start guards against
    /// late-arriving results of abandoned submissions
    pub submission_id: Uuid,

    /// Current workflow state
    pub state: WorkflowState,

    /// Progress indicator (0..=100), monotonically non-decreasing
    pub progress: u8,

    /// Cancer type under analysis; None while idle
    pub cancer_type: Option<String>,

    /// Submission start time
    pub started_at: DateTime<Utc>,

    /// Set when the session reaches DONE
    pub ended_at: Option<DateTime<Utc>>,

    /// Result published on completion
    pub result: Option<AnalysisResult>,
}

impl AnalysisSession {
    /// Fresh idle session (initial state, and the state after a reset)
    pub fn idle() -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            state: WorkflowState::Idle,
            progress: 0,
            cancer_type: None,
            started_at: Utc::now(),
            ended_at: None,
            result: None,
        }
    }

    /// New session entering UPLOADING for the given cancer type
    pub fn begin(cancer_type: String) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            state: WorkflowState::Uploading,
            progress: 0,
            cancer_type: Some(cancer_type),
            started_at: Utc::now(),
            ended_at: None,
            result: None,
        }
    }

    /// Transition to a new state, stamping `ended_at` on DONE
    pub fn transition_to(&mut self, new_state: WorkflowState) -> StateTransition {
        let transition = StateTransition {
            submission_id: self.submission_id,
            old_state: self.state,
            new_state,
            transitioned_at: Utc::now(),
        };
        self.state = new_state;

        if new_state == WorkflowState::Done {
            self.ended_at = Some(Utc::now());
        }

        transition
    }

    /// Raise progress by `step`, capped at `ceiling`
    ///
    /// Returns the new value when the indicator actually moved. Progress is
    /// monotonic: a cap below the current value never lowers it.
    pub fn advance_progress(&mut self, step: u8, ceiling: u8) -> Option<u8> {
        let next = self.progress.saturating_add(step).min(ceiling);
        if next > self.progress {
            self.progress = next;
            Some(next)
        } else {
            None
        }
    }

    /// Jump the indicator to 100 (terminal outcome known)
    pub fn complete_progress(&mut self) {
        self.progress = 100;
    }
}
