//! Learning capture: the contract with the learning recorder.
//!
//! When a plan completes, the driving caller may propose a reusable insight.
//! The controller turns an approved proposal into a [`Learning`] record; a
//! [`LearningRecorder`] persists it keyed by title. Recording the same title
//! twice is a no-op, not an error.

use std::{collections::BTreeMap, str::FromStr, sync::Mutex};

use jiff::Timestamp;
use log::info;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    controller::{required, PlanController},
    error::{PlannerError, Refusal, Result},
    models::{PlanStatus, SessionState},
    params::SaveLearning,
};

/// How well a captured approach worked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    Low,
    #[default]
    Medium,
    High,
}

impl Effectiveness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effectiveness::Low => "low",
            Effectiveness::Medium => "medium",
            Effectiveness::High => "high",
        }
    }
}

impl FromStr for Effectiveness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Effectiveness::Low),
            "medium" => Ok(Effectiveness::Medium),
            "high" => Ok(Effectiveness::High),
            _ => Err(format!("Invalid effectiveness: {s}")),
        }
    }
}

/// External approval for persisting a learning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Approval {
    Granted,
    #[default]
    Denied,
}

/// A distilled insight from a completed plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Learning {
    /// Unique key
    pub title: String,
    pub learning: String,
    pub applies_to: String,
    pub effectiveness: Effectiveness,
    /// Objective of the plan the insight came from
    pub source_objective: String,
    /// Number of steps in that plan
    pub source_steps: usize,
    pub created_at: Timestamp,
}

/// Result of handing a learning to a recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Saved,
    /// A learning with the same title was already recorded; nothing changed.
    AlreadyExists,
}

/// Persists learnings for future sessions.
pub trait LearningRecorder {
    /// Records a learning idempotently by title.
    fn record(&self, learning: &Learning) -> Result<RecordOutcome>;
}

/// Process-local recorder for hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    learnings: Mutex<BTreeMap<String, Learning>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<Learning> {
        self.learnings
            .lock()
            .ok()
            .and_then(|learnings| learnings.get(title).cloned())
    }

    pub fn len(&self) -> usize {
        self.learnings.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LearningRecorder for MemoryRecorder {
    fn record(&self, learning: &Learning) -> Result<RecordOutcome> {
        let mut learnings = self
            .learnings
            .lock()
            .map_err(|_| PlannerError::Configuration {
                message: "Learning store lock poisoned".to_string(),
            })?;

        if learnings.contains_key(&learning.title) {
            return Ok(RecordOutcome::AlreadyExists);
        }
        learnings.insert(learning.title.clone(), learning.clone());
        Ok(RecordOutcome::Saved)
    }
}

impl PlanController {
    /// Builds a learning record from a completed plan.
    ///
    /// Only reads the store. Refused unless the plan is complete and the
    /// proposal has been approved.
    pub fn capture_learning(
        &self,
        state: &SessionState,
        params: &SaveLearning,
        approval: Approval,
    ) -> std::result::Result<Learning, Refusal> {
        let plan = state.plan().ok_or_else(Refusal::no_plan)?;

        if plan.status != PlanStatus::Complete {
            return Err(Refusal::guard(
                "Learnings can only be captured from a completed plan.",
            ));
        }
        if approval != Approval::Granted {
            return Err(Refusal::guard("Saving a learning requires explicit approval.")
                .with_hint("Propose the learning and wait for the user to approve it."));
        }

        let learning = Learning {
            title: required("title", &params.title)?.to_string(),
            learning: required("learning", &params.learning)?.to_string(),
            applies_to: required("applies_to", &params.applies_to)?.to_string(),
            effectiveness: params.effectiveness,
            source_objective: plan.objective.clone(),
            source_steps: plan.len(),
            created_at: Timestamp::now(),
        };

        info!("Learning captured: {}", learning.title);
        Ok(learning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::StepSpec,
        params::{CompleteStep, CreatePlan},
    };

    fn completed_state(controller: &PlanController) -> SessionState {
        let mut state = SessionState::new("learning");
        controller
            .create_plan(
                &mut state,
                &CreatePlan {
                    objective: "Compare pricing".to_string(),
                    steps: vec![StepSpec::new("Collect prices")],
                    context: None,
                },
            )
            .unwrap();
        controller
            .complete_step(
                &mut state,
                &CompleteStep {
                    output: "Prices table".to_string(),
                },
            )
            .unwrap();
        state
    }

    fn proposal() -> SaveLearning {
        SaveLearning {
            title: "Pricing sources".to_string(),
            learning: "Official pricing pages hide enterprise tiers".to_string(),
            applies_to: "pricing research".to_string(),
            effectiveness: Effectiveness::High,
        }
    }

    #[test]
    fn test_capture_requires_completed_plan() {
        let controller = PlanController::default();
        let state = SessionState::new("empty");
        let refusal = controller
            .capture_learning(&state, &proposal(), Approval::Granted)
            .unwrap_err();
        assert_eq!(refusal.kind, crate::error::RefusalKind::NoPlan);
    }

    #[test]
    fn test_capture_requires_approval() {
        let controller = PlanController::default();
        let state = completed_state(&controller);
        let refusal = controller
            .capture_learning(&state, &proposal(), Approval::Denied)
            .unwrap_err();
        assert_eq!(refusal.kind, crate::error::RefusalKind::Guard);
    }

    #[test]
    fn test_capture_copies_plan_source() {
        let controller = PlanController::default();
        let state = completed_state(&controller);
        let before = state.clone();
        let learning = controller
            .capture_learning(&state, &proposal(), Approval::Granted)
            .unwrap();
        assert_eq!(learning.source_objective, "Compare pricing");
        assert_eq!(learning.source_steps, 1);
        assert_eq!(learning.effectiveness, Effectiveness::High);
        assert_eq!(state, before);
    }

    #[test]
    fn test_memory_recorder_is_idempotent() {
        let controller = PlanController::default();
        let state = completed_state(&controller);
        let learning = controller
            .capture_learning(&state, &proposal(), Approval::Granted)
            .unwrap();

        let recorder = MemoryRecorder::new();
        assert_eq!(recorder.record(&learning).unwrap(), RecordOutcome::Saved);
        assert_eq!(
            recorder.record(&learning).unwrap(),
            RecordOutcome::AlreadyExists
        );
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.get("Pricing sources"), Some(learning));
    }

    #[test]
    fn test_effectiveness_parsing() {
        assert_eq!("HIGH".parse::<Effectiveness>().unwrap(), Effectiveness::High);
        assert!("great".parse::<Effectiveness>().is_err());
    }
}
