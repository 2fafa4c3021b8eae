//! Core library for PaL, a plan-and-execute controller for tool-calling agents.
//!
//! A driving caller (typically a language model) works through an explicit
//! plan one step at a time. The controller owns the plan state machine and
//! enforces its invariants; the caller only sees a fixed set of operations
//! and the results they return.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): plans, steps, statuses, and the per-session
//!   store
//! - **Controller** ([`controller`]): every operation, its guards, and the
//!   typed [`Outcome`](controller::Outcome) or [`Refusal`](error::Refusal) it
//!   returns
//! - **Display** ([`display`]): the text relayed back to the caller
//! - **Driver** ([`driver`]): the capability interface and the
//!   decide/apply/relay loop
//! - **Host** ([`host`]): session-scoped stores persisted in SQLite ([`db`])
//!
//! # Quick Start
//!
//! ```rust
//! use pal_core::{
//!     display::render,
//!     models::{PlanStatus, SessionState, StepSpec},
//!     params::{CompleteStep, CreatePlan},
//!     PlanController,
//! };
//!
//! let controller = PlanController::default();
//! let mut state = SessionState::new("quick-start");
//!
//! let created = controller.create_plan(
//!     &mut state,
//!     &CreatePlan {
//!         objective: "Analyze X".to_string(),
//!         steps: vec![
//!             StepSpec::new("Gather data").with_criteria("3 sources found"),
//!             StepSpec::new("Summarize").with_criteria("<200 words"),
//!         ],
//!         context: None,
//!     },
//! );
//! assert!(render(&created).starts_with("✅ Plan created!"));
//!
//! for output in ["Found 3 sources: A, B, C", "Summary written"] {
//!     controller
//!         .complete_step(&mut state, &CompleteStep { output: output.to_string() })
//!         .unwrap();
//! }
//! assert_eq!(state.status(), PlanStatus::Complete);
//! ```

pub mod config;
pub mod controller;
pub mod db;
pub mod display;
pub mod driver;
pub mod error;
pub mod host;
pub mod learning;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use config::ControllerConfig;
pub use controller::{Outcome, PlanController, PlanEvent, Response, Snapshot};
pub use db::Database;
pub use display::render;
pub use driver::{drive, DrivingCaller, Operation, PlanTools, ScriptedCaller, Session};
pub use error::{PlannerError, Refusal, RefusalKind, Result};
pub use host::{HostBuilder, SessionHost};
pub use learning::{Approval, Effectiveness, Learning, LearningRecorder, RecordOutcome};
pub use models::{Plan, PlanStatus, SessionState, Step, StepSpec, StepStatus};
pub use params::{BlockStep, CompleteStep, CreatePlan, ResetPlan, SaveLearning, UpdatePlan};
