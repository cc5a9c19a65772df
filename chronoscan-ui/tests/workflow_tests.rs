//! Workflow State Machine Tests
//!
//! Session-level transitions and progress invariants, independent of any
//! network activity.

use chronoscan_ui::models::{AnalysisSession, WorkflowState};

/// TC-WF-001: IDLE → UPLOADING on submission start
#[test]
fn tc_wf_001_begin_enters_uploading() {
    // Given: a fresh idle session
    let idle = AnalysisSession::idle();
    assert_eq!(idle.state, WorkflowState::Idle);
    assert_eq!(idle.progress, 0);
    assert!(idle.result.is_none());

    // When: a submission begins
    let session = AnalysisSession::begin("lung".to_string());

    // Then: state is UPLOADING with a fresh submission id
    assert_eq!(session.state, WorkflowState::Uploading);
    assert_eq!(session.cancer_type.as_deref(), Some("lung"));
    assert_ne!(session.submission_id, idle.submission_id);
}

/// TC-WF-002: UPLOADING → ANALYZING transition record
#[test]
fn tc_wf_002_uploading_to_analyzing() {
    let mut session = AnalysisSession::begin("brain".to_string());

    let transition = session.transition_to(WorkflowState::Analyzing);

    assert_eq!(session.state, WorkflowState::Analyzing);
    assert_eq!(transition.old_state, WorkflowState::Uploading);
    assert_eq!(transition.new_state, WorkflowState::Analyzing);
    assert!(session.ended_at.is_none());
}

/// TC-WF-003: DONE stamps the session end time
#[test]
fn tc_wf_003_done_is_terminal() {
    let mut session = AnalysisSession::begin("lung".to_string());
    session.transition_to(WorkflowState::Analyzing);
    session.transition_to(WorkflowState::Done);

    assert!(session.ended_at.is_some());
    assert!(session.state.is_terminal());
    assert!(!session.state.is_in_flight());
}

/// TC-WF-004: FAILED_FALLBACK is terminal for the ticker but not the end
/// of the session
#[test]
fn tc_wf_004_failed_fallback_is_terminal() {
    let mut session = AnalysisSession::begin("lung".to_string());
    session.transition_to(WorkflowState::Analyzing);
    session.transition_to(WorkflowState::FailedFallback);

    assert!(session.state.is_terminal());
    // Only DONE stamps ended_at; the fallback still has a delayed DONE ahead
    assert!(session.ended_at.is_none());

    session.transition_to(WorkflowState::Done);
    assert!(session.ended_at.is_some());
}

/// TC-WF-005: progress is monotonic and capped at the ceiling
#[test]
fn tc_wf_005_progress_monotonic_and_capped() {
    let mut session = AnalysisSession::begin("lung".to_string());

    let mut last = 0;
    for _ in 0..40 {
        if let Some(progress) = session.advance_progress(3, 40) {
            assert!(progress > last, "progress went backwards");
            assert!(progress <= 40, "progress exceeded the ceiling");
            last = progress;
        }
    }
    assert_eq!(session.progress, 40);

    // Further ticks at the ceiling are no-ops
    assert_eq!(session.advance_progress(3, 40), None);
    assert_eq!(session.progress, 40);
}

/// TC-WF-006: completion jumps progress to exactly 100
#[test]
fn tc_wf_006_complete_progress() {
    let mut session = AnalysisSession::begin("lung".to_string());
    session.advance_progress(3, 40);
    session.complete_progress();
    assert_eq!(session.progress, 100);
}

/// TC-WF-007: in-flight predicate covers exactly UPLOADING and ANALYZING
#[test]
fn tc_wf_007_in_flight_states() {
    assert!(!WorkflowState::Idle.is_in_flight());
    assert!(WorkflowState::Uploading.is_in_flight());
    assert!(WorkflowState::Analyzing.is_in_flight());
    assert!(!WorkflowState::Done.is_in_flight());
    assert!(!WorkflowState::FailedFallback.is_in_flight());
}
