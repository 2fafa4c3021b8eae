//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Step, StepStatus};

/// The single active structured goal of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Goal description, fixed until the plan is reset
    pub objective: String,

    /// Optional background, fixed until the plan is reset
    pub context: Option<String>,

    /// Ordered steps; `steps[i].id == i + 1`
    pub steps: Vec<Step>,

    /// 1-based id of the step awaiting completion
    pub current_step: usize,

    /// Either `InProgress` or `Complete` while the plan exists
    pub status: PlanStatus,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the final step was completed (UTC)
    pub completed_at: Option<Timestamp>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.status == PlanStatus::Complete
    }

    /// Looks up a step by its 1-based id.
    pub fn step(&self, id: usize) -> Option<&Step> {
        id.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    pub(crate) fn step_mut(&mut self, id: usize) -> Option<&mut Step> {
        id.checked_sub(1).and_then(move |index| self.steps.get_mut(index))
    }

    /// The step awaiting completion.
    pub fn current(&self) -> Option<&Step> {
        self.step(self.current_step)
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Step> {
        self.step_mut(self.current_step)
    }

    /// Rewrites every step id from its position.
    pub(crate) fn renumber(&mut self) {
        for (index, step) in self.steps.iter_mut().enumerate() {
            step.id = index + 1;
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self
                .steps
                .iter()
                .filter(|s| s.status == StepStatus::Complete)
                .count(),
            total: self.steps.len(),
        }
    }
}

/// Completed-versus-total step counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of completed steps in `0.0..=1.0`; zero for an empty plan.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Whole-number percentage, rounded down.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.completed * 100 / self.total
        }
    }
}
