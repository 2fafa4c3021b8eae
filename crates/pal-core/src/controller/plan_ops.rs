//! Plan-level operations: create, inspect, reset.

use jiff::Timestamp;
use log::{debug, info};

use super::{optional, required, PlanController, PlanEvent, Response};
use crate::{
    error::Refusal,
    models::{Plan, PlanStatus, SessionState, Step},
    params::{CreatePlan, ResetPlan},
};

impl PlanController {
    /// Creates a plan from an ordered list of steps.
    ///
    /// Refused while another plan is in progress. A completed plan is replaced
    /// without needing a reset.
    pub fn create_plan(&self, state: &mut SessionState, params: &CreatePlan) -> Response {
        if state.status() == PlanStatus::InProgress {
            debug!("create_plan refused: session {} has an active plan", state.session_id);
            return Err(Refusal::guard("A plan is already in progress.").with_hint(
                "Options:\n  - Complete the current plan\n  - Call reset_plan(confirm=true) to start fresh",
            ));
        }

        let objective = required("objective", &params.objective)?;
        if params.steps.is_empty() {
            return Err(Refusal::validation("A plan needs at least one step."));
        }
        if let Some(position) = params
            .steps
            .iter()
            .position(|spec| spec.description.trim().is_empty())
        {
            return Err(Refusal::validation(format!(
                "Invalid step at position {}: a description is required.",
                position + 1
            ))
            .with_hint("Each step needs {\"description\": \"...\", \"success_criteria\": \"...\"}."));
        }

        let now = Timestamp::now();
        let mut steps: Vec<Step> = params
            .steps
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Step::from_spec(index + 1, spec, &self.config.default_success_criteria)
            })
            .collect();
        steps[0].started_at = Some(now);

        info!("Plan created: {objective} ({} steps)", steps.len());

        state.plan = Some(Plan {
            objective: objective.to_string(),
            context: optional(params.context.as_deref()),
            steps,
            current_step: 1,
            status: PlanStatus::InProgress,
            created_at: now,
            completed_at: None,
        });

        Ok(self.outcome(PlanEvent::Created, state))
    }

    /// Reports the current plan without changing it.
    pub fn get_status(&self, state: &SessionState) -> Response {
        Ok(self.outcome(PlanEvent::StatusReported, state))
    }

    /// Discards the plan. Without confirmation this only returns a warning.
    pub fn reset_plan(&self, state: &mut SessionState, params: &ResetPlan) -> Response {
        if !params.confirm {
            return Err(
                Refusal::guard("This will clear the current plan and all progress.")
                    .with_hint("To confirm, call reset_plan(confirm=true)."),
            );
        }

        state.plan = None;
        info!("Plan reset for session {}", state.session_id);
        Ok(self.outcome(PlanEvent::Reset, state))
    }
}
