//! Step model definition and related functionality.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::StepStatus;

/// Input shape for a step that has not been placed in a plan yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepSpec {
    /// What to do
    pub description: String,
    /// How completion is verified; a generic criterion is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<String>,
}

impl StepSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            success_criteria: None,
        }
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.success_criteria = Some(criteria.into());
        self
    }
}

/// Represents one unit of plan work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// 1-based position within the plan, renumbered on every structural change
    pub id: usize,

    /// What to do
    pub description: String,

    /// How completion is verified
    pub success_criteria: String,

    /// Current status of the step
    #[serde(default)]
    pub status: StepStatus,

    /// When the step became the current step
    pub started_at: Option<Timestamp>,

    /// When the step was completed
    pub completed_at: Option<Timestamp>,

    /// Completion evidence, blocker note, or revisit note
    pub output: Option<String>,
}

impl Step {
    /// Builds a pending step from its input spec. Text is trimmed and a blank
    /// or missing criterion falls back to `default_criteria`.
    pub(crate) fn from_spec(id: usize, spec: &StepSpec, default_criteria: &str) -> Self {
        let success_criteria = spec
            .success_criteria
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_criteria)
            .to_string();

        Self {
            id,
            description: spec.description.trim().to_string(),
            success_criteria,
            status: StepStatus::Pending,
            started_at: None,
            completed_at: None,
            output: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == StepStatus::Complete
    }

    /// Returns the step to a fresh pending state.
    pub(crate) fn reset(&mut self) {
        self.status = StepStatus::Pending;
        self.started_at = None;
        self.completed_at = None;
        self.output = None;
    }
}
