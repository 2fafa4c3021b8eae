//! The plan controller: the operation surface over a session's plan store.
//!
//! [`PlanController`] holds only configuration. Every operation receives the
//! session's [`SessionState`] as an explicit context parameter, mutates it in
//! place, and returns a [`Response`]: either an [`Outcome`] describing what
//! happened, or a [`Refusal`] that left the store untouched.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ Driving caller  │    │ PlanController  │    │  SessionState   │
//! │ (Operation)     │───▶│ (guards, rules) │───▶│  (plan store)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          ▲                      │
//!          └──── Response ────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`plan_ops`]: create, status, reset
//! - [`step_ops`]: complete and block the current step
//! - [`mutations`]: the add/insert/remove/revisit plan updates
//! - [`outcome`]: result types shared by all operations
//!
//! # Examples
//!
//! ```rust
//! use pal_core::{
//!     controller::PlanController,
//!     models::{PlanStatus, SessionState, StepSpec},
//!     params::{CompleteStep, CreatePlan},
//! };
//!
//! let controller = PlanController::default();
//! let mut state = SessionState::new("demo");
//!
//! controller
//!     .create_plan(
//!         &mut state,
//!         &CreatePlan {
//!             objective: "Analyze X".to_string(),
//!             steps: vec![StepSpec::new("Gather data"), StepSpec::new("Summarize")],
//!             context: None,
//!         },
//!     )
//!     .unwrap();
//!
//! controller
//!     .complete_step(&mut state, &CompleteStep { output: "Found 3 sources".to_string() })
//!     .unwrap();
//!
//! assert_eq!(state.plan().unwrap().current_step, 2);
//! assert_eq!(state.status(), PlanStatus::InProgress);
//! ```

pub mod mutations;
pub mod outcome;
pub mod plan_ops;
pub mod step_ops;


pub use outcome::{BoardStyle, Outcome, PlanEvent, Response, Snapshot};

use crate::{config::ControllerConfig, error::Refusal, models::SessionState};

/// Enforces plan invariants while executing operations on a session store.
#[derive(Debug, Clone, Default)]
pub struct PlanController {
    config: ControllerConfig,
}

impl PlanController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub(crate) fn outcome(&self, event: PlanEvent, state: &SessionState) -> Outcome {
        Outcome {
            event,
            snapshot: Snapshot::capture(state, &self.config),
        }
    }
}

/// Trims a required text argument, refusing it when blank.
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, Refusal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Refusal::validation(format!("'{field}' must not be empty.")))
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional text argument, treating blank as absent.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
