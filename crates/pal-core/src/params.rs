//! Parameter structures for plan controller operations.
//!
//! These are the typed arguments a driving caller passes to the controller.
//! They deserialize directly from function-call JSON, and with the `schema`
//! feature enabled they derive [`schemars::JsonSchema`] so the same types can
//! be advertised as tool parameter schemas.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Tool call JSON │    │  Core Params    │    │ PlanController  │
//! │ (name + args)   │───▶│ (serde derives) │───▶│  operations     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! [`UpdatePlan`] is a tagged enum: each action carries exactly the fields it
//! needs, so "insert without a step" cannot be expressed.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{learning::Effectiveness, models::StepSpec};

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// The overall goal to achieve (required)
    pub objective: String,
    /// Ordered steps, each with a description and optional success criteria
    pub steps: Vec<StepSpec>,
    /// Optional background information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Parameters for completing the current step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteStep {
    /// Evidence that the step's success criteria were met
    pub output: String,
}

/// A structural change to the active plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum UpdatePlan {
    /// Append a new step at the end of the plan
    Add { new_step: StepSpec },
    /// Insert a new step immediately after `step_id`
    Insert { step_id: usize, new_step: StepSpec },
    /// Remove a step that has not been reached yet
    Remove { step_id: usize },
    /// Roll back to `step_id`, resetting it and every later step
    Revisit { step_id: usize, reason: String },
}

impl UpdatePlan {
    /// Action name as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            UpdatePlan::Add { .. } => "add",
            UpdatePlan::Insert { .. } => "insert",
            UpdatePlan::Remove { .. } => "remove",
            UpdatePlan::Revisit { .. } => "revisit",
        }
    }
}

/// Parameters for marking the current step as blocked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BlockStep {
    /// What is preventing progress
    pub blocker: String,
    /// Optional suggested resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Parameters for discarding the current plan.
///
/// Reset is a two-step operation: a call without `confirm = true` only
/// returns a warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ResetPlan {
    /// Must be true to actually discard the plan
    #[serde(default)]
    pub confirm: bool,
}

/// Parameters for recording a reusable insight from a completed plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveLearning {
    /// Short descriptive name; learnings are keyed by title
    pub title: String,
    /// The specific, actionable insight
    pub learning: String,
    /// Kinds of tasks the insight helps with
    pub applies_to: String,
    /// How well the approach worked
    #[serde(default)]
    pub effectiveness: Effectiveness,
}
