//! Operations on the current step.

use jiff::Timestamp;
use log::{info, warn};

use super::{optional, required, PlanController, PlanEvent, Response};
use crate::{
    error::Refusal,
    models::{PlanStatus, SessionState, StepStatus},
    params::{BlockStep, CompleteStep},
};

impl PlanController {
    /// Completes the current step and advances, closing the plan after the
    /// final step.
    ///
    /// A blocked current step is resolved by completing it.
    pub fn complete_step(&self, state: &mut SessionState, params: &CompleteStep) -> Response {
        let plan = state.plan.as_mut().ok_or_else(Refusal::no_plan)?;

        if plan.is_complete() {
            return Err(Refusal::guard("Plan is already complete.")
                .with_hint("Use reset_plan(confirm=true) to start a new one."));
        }

        let current = plan.current_step;
        let total = plan.len();
        let output = required("output", &params.output)?;
        let step = plan
            .current_mut()
            .ok_or_else(|| Refusal::step_not_found(current))?;

        if step.is_complete() {
            return Err(Refusal::guard(format!("Step {current} is already complete.")));
        }

        let now = Timestamp::now();
        step.status = StepStatus::Complete;
        step.completed_at = Some(now);
        step.output = Some(output.to_string());
        info!("Step {current} completed: {}", step.description);

        let event = if current >= total {
            plan.status = PlanStatus::Complete;
            plan.completed_at = Some(now);
            info!("Plan complete: {}", plan.objective);
            PlanEvent::PlanCompleted {
                step_id: current,
                duration: now.duration_since(plan.created_at),
            }
        } else {
            plan.current_step = current + 1;
            if let Some(next) = plan.current_mut() {
                next.started_at = Some(now);
            }
            PlanEvent::StepCompleted {
                step_id: current,
                next_step_id: current + 1,
            }
        };

        Ok(self.outcome(event, state))
    }

    /// Marks the current step as blocked without advancing.
    pub fn block_step(&self, state: &mut SessionState, params: &BlockStep) -> Response {
        let plan = state.plan.as_mut().ok_or_else(Refusal::no_plan)?;

        if plan.is_complete() {
            return Err(Refusal::guard("Plan is already complete; there is no step to block.")
                .with_hint("Use update_plan(action='revisit', ...) to reopen a step."));
        }

        let blocker = required("blocker", &params.blocker)?;
        let suggestion = optional(params.suggestion.as_deref());
        let current = plan.current_step;
        let step = plan
            .current_mut()
            .ok_or_else(|| Refusal::step_not_found(current))?;

        if step.is_complete() {
            return Err(Refusal::guard(format!("Step {current} is already complete.")));
        }

        step.status = StepStatus::Blocked;
        step.output = Some(format!("BLOCKED: {blocker}"));
        warn!("Step {current} blocked: {blocker}");

        let event = PlanEvent::StepBlocked {
            step_id: current,
            blocker: blocker.to_string(),
            suggestion,
        };
        Ok(self.outcome(event, state))
    }
}
