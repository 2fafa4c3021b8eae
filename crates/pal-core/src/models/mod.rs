//! Data models for plans, steps, and the session plan store.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation separate from the data
//! structures the controller mutates.
//!
//! # Invariants
//!
//! The controller maintains the following after every operation:
//!
//! 1. `steps[i].id == i + 1` for every step.
//! 2. `1 <= current_step <= steps.len()` while a plan exists.
//! 3. A completed step only changes through a revisit.
//! 4. `Plan::status` is `Complete` only once the last step is complete.
//!
//! # Examples
//!
//! ```rust
//! use pal_core::models::{PlanStatus, SessionState};
//!
//! let state = SessionState::new("session-1");
//! assert_eq!(state.status(), PlanStatus::NoPlan);
//! ```

pub mod plan;
pub mod session;
pub mod status;
pub mod step;


pub use plan::{Plan, Progress};
pub use session::SessionState;
pub use status::{PlanStatus, StepStatus};
pub use step::{Step, StepSpec};
