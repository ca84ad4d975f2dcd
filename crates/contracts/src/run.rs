//! Per-run state machine and outcome types

use serde::{Deserialize, Serialize};

/// Pipeline stage identifier (used for logging/metrics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    /// Fetch + decode on the I/O lane
    Fetch,
    /// Filter transform on the CPU lane
    Transform,
}

impl StageKind {
    /// Stable lowercase name for metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Fetch => "fetch",
            StageKind::Transform => "transform",
        }
    }
}

/// State of a single pipeline run.
///
/// Transitions: `Idle → Fetching → Transforming → Displaying` on success;
/// `Failed` is reachable from `Fetching` or `Transforming`; `Cancelled` is
/// reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Run created, no stage started
    Idle,
    /// Stage 1 in flight
    Fetching,
    /// Stage 2 in flight
    Transforming,
    /// Terminal: artifact handed to the presenter
    Displaying,
    /// Terminal: a stage failed and the failure handler ran
    Failed,
    /// Terminal: scope cancelled before completion, result discarded
    Cancelled,
}

impl RunState {
    /// Whether this state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Displaying | RunState::Failed | RunState::Cancelled
        )
    }
}

/// Terminal outcome of a run (for summaries/metrics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Both stages succeeded, artifact displayed
    Displayed,
    /// A stage failed, failure handler invoked
    Failed,
    /// Scope cancelled mid-run
    Cancelled,
}

impl RunOutcome {
    /// Stable lowercase name for metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Displayed => "displayed",
            RunOutcome::Failed => "failed",
            RunOutcome::Cancelled => "cancelled",
        }
    }
}
