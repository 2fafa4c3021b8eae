//! Display formatting for controller results.
//!
//! Controller operations return typed [`Outcome`](crate::controller::Outcome)
//! and [`Refusal`](crate::error::Refusal) values. This module turns them into
//! the human-readable text a driving caller relays back into its transcript,
//! keeping presentation out of the result types.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Response     │    │ Display wrappers│    │   Transcript    │
//! │ (Outcome/Refusal│───▶│ & status board  │───▶│     text        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`results`]: per-operation messages and refusal rendering
//! - [`board`]: the status board and progress bar
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use pal_core::{
//!     controller::PlanController,
//!     display::render,
//!     models::SessionState,
//!     params::ResetPlan,
//! };
//!
//! let controller = PlanController::default();
//! let mut state = SessionState::new("demo");
//!
//! let response = controller.reset_plan(&mut state, &ResetPlan { confirm: false });
//! assert!(render(&response).contains("reset_plan(confirm=true)"));
//!
//! let response = controller.get_status(&state);
//! assert!(render(&response).contains("No active plan"));
//! ```

pub mod board;
pub mod models;
pub mod results;

pub use board::{NoPlanBoard, ProgressBar};
pub use models::StepListing;
pub use results::{render, RefusalMessage, ResponseMessage};
