//! Successful controller results.

use jiff::SignedDuration;

use crate::{
    config::ControllerConfig,
    error::Refusal,
    learning::{Learning, RecordOutcome},
    models::{Plan, PlanStatus, Progress, SessionState, Step},
};

/// Result of every controller operation.
pub type Response = std::result::Result<Outcome, Refusal>;

/// What an operation did to the plan store.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    Created,
    StepCompleted {
        step_id: usize,
        next_step_id: usize,
    },
    /// The final step was completed; a learning may be worth capturing.
    PlanCompleted {
        step_id: usize,
        duration: SignedDuration,
    },
    StepAdded {
        step_id: usize,
        reopened: bool,
    },
    StepInserted {
        after: usize,
        step_id: usize,
        reopened: bool,
    },
    StepRemoved {
        removed: Step,
    },
    Revisited {
        step_id: usize,
        reason: String,
    },
    StepBlocked {
        step_id: usize,
        blocker: String,
        suggestion: Option<String>,
    },
    StatusReported,
    Reset,
    LearningSaved {
        learning: Learning,
        outcome: RecordOutcome,
    },
}

/// Rendering limits carried with a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStyle {
    pub preview_chars: usize,
    pub progress_width: usize,
}

impl From<&ControllerConfig> for BoardStyle {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            preview_chars: config.preview_chars,
            progress_width: config.progress_width,
        }
    }
}

/// Read-only copy of the plan store taken after an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub plan: Option<Plan>,
    pub style: BoardStyle,
}

impl Snapshot {
    pub(crate) fn capture(state: &SessionState, config: &ControllerConfig) -> Self {
        Self {
            plan: state.plan.clone(),
            style: config.into(),
        }
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn status(&self) -> PlanStatus {
        self.plan
            .as_ref()
            .map_or(PlanStatus::NoPlan, |plan| plan.status)
    }

    pub fn progress(&self) -> Progress {
        self.plan.as_ref().map(Plan::progress).unwrap_or_default()
    }

    /// The step awaiting completion, if a plan exists.
    pub fn current(&self) -> Option<&Step> {
        self.plan.as_ref().and_then(Plan::current)
    }
}

/// A successful operation: the event plus the resulting store.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub event: PlanEvent,
    pub snapshot: Snapshot,
}

impl Outcome {
    /// Whether the driving caller may offer to capture a learning.
    pub fn learning_opportunity(&self) -> bool {
        matches!(self.event, PlanEvent::PlanCompleted { .. })
    }
}
