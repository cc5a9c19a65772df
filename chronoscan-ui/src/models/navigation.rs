//! Stage navigation flow
//!
//! Tracks which screen the user has reached and derives the render hints
//! for the progress diagram. Free jumps are allowed; navigation carries no
//! business rules and never touches the in-flight submission.

use serde::{Deserialize, Serialize};

/// One screen in the fixed navigation sequence
///
/// The two detail leaves share order index 2: they are mutually exclusive
/// as the current stage but count equally for "visited" classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Home,
    Analyze,
    ImageViewer,
    ResultCard,
}

impl Stage {
    /// Position in the flow diagram
    pub fn order(&self) -> u8 {
        match self {
            Stage::Home => 0,
            Stage::Analyze => 1,
            Stage::ImageViewer | Stage::ResultCard => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Home => "home",
            Stage::Analyze => "analyze",
            Stage::ImageViewer => "image_viewer",
            Stage::ResultCard => "result_card",
        }
    }

    /// All stages in diagram order
    pub const ALL: [Stage; 4] = [
        Stage::Home,
        Stage::Analyze,
        Stage::ImageViewer,
        Stage::ResultCard,
    ];
}

/// Render hint for one node of the flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Active,
    Visited,
    Upcoming,
}

/// Session-scoped navigation state
#[derive(Debug, Clone)]
pub struct NavigationFlow {
    current: Stage,
}

impl NavigationFlow {
    pub fn new() -> Self {
        Self {
            current: Stage::Home,
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Jump to a stage unconditionally; returns the stage left behind
    pub fn navigate(&mut self, stage: Stage) -> Stage {
        let previous = self.current;
        self.current = stage;
        previous
    }

    /// A stage is visited once the user has moved past its order index
    pub fn visited(&self, stage: Stage) -> bool {
        self.current.order() > stage.order()
    }

    pub fn is_active(&self, stage: Stage) -> bool {
        self.current == stage
    }

    pub fn status(&self, stage: Stage) -> StageStatus {
        if self.is_active(stage) {
            StageStatus::Active
        } else if self.visited(stage) {
            StageStatus::Visited
        } else {
            StageStatus::Upcoming
        }
    }
}

impl Default for NavigationFlow {
    fn default() -> Self {
        Self::new()
    }
}
