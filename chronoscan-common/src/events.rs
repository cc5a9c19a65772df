//! Event types for the ChronoScan event system
//!
//! Provides shared event definitions and the EventBus used to fan progress
//! and navigation updates out to SSE subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// ChronoScan event types
///
/// Workflow and navigation state are carried as strings so that subscribers
/// (and the SSE wire format) stay decoupled from the module-local enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChronoscanEvent {
    /// A new analysis submission was accepted
    AnalysisStarted {
        submission_id: Uuid,
        cancer_type: String,
        timestamp: DateTime<Utc>,
    },

    /// Workflow state transition
    WorkflowStateChanged {
        submission_id: Uuid,
        old_state: String,
        new_state: String,
        timestamp: DateTime<Utc>,
    },

    /// Progress indicator update during an in-flight submission
    AnalysisProgress {
        submission_id: Uuid,
        state: String,
        progress: u8,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Submission reached DONE and a result is available
    AnalysisCompleted {
        submission_id: Uuid,
        simulated: bool,
        risk_score: f64,
        timestamp: DateTime<Utc>,
    },

    /// User navigated to a different stage
    StageChanged {
        from: String,
        to: String,
        timestamp: DateTime<Utc>,
    },
}

impl ChronoscanEvent {
    /// Event type name used as the SSE event field
    pub fn event_type(&self) -> &'static str {
        match self {
            ChronoscanEvent::AnalysisStarted { .. } => "AnalysisStarted",
            ChronoscanEvent::WorkflowStateChanged { .. } => "WorkflowStateChanged",
            ChronoscanEvent::AnalysisProgress { .. } => "AnalysisProgress",
            ChronoscanEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
            ChronoscanEvent::StageChanged { .. } => "StageChanged",
        }
    }
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChronoscanEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ChronoscanEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if nobody is listening.
    pub fn emit(
        &self,
        event: ChronoscanEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<ChronoscanEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the no-subscribers case
    ///
    /// Progress ticks and navigation updates are fire-and-forget; a missing
    /// subscriber is not an error.
    pub fn emit_lossy(&self, event: ChronoscanEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::trace!("No subscribers for event: {}", e.0.event_type());
        }
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_emitted_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit_lossy(ChronoscanEvent::StageChanged {
            from: "home".to_string(),
            to: "analyze".to_string(),
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.expect("event");
        assert_eq!(event.event_type(), "StageChanged");
    }

    #[test]
    fn emit_without_subscribers_is_not_an_error() {
        let bus = EventBus::new(4);
        // emit_lossy must swallow the SendError
        bus.emit_lossy(ChronoscanEvent::AnalysisStarted {
            submission_id: Uuid::new_v4(),
            cancer_type: "lung".to_string(),
            timestamp: Utc::now(),
        });
    }
}
