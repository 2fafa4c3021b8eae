//! Structural plan updates: add, insert, remove, revisit.
//!
//! Every path renumbers the steps before returning, so ids always match
//! positions.

use jiff::Timestamp;
use log::info;

use super::{required, PlanController, PlanEvent, Response};
use crate::{
    error::Refusal,
    models::{Plan, PlanStatus, SessionState, Step, StepSpec},
    params::UpdatePlan,
};

impl PlanController {
    /// Applies one structural change to the active plan.
    pub fn update_plan(&self, state: &mut SessionState, params: &UpdatePlan) -> Response {
        let plan = state.plan.as_mut().ok_or_else(Refusal::no_plan)?;

        let event = match params {
            UpdatePlan::Add { new_step } => self.add_step(plan, new_step)?,
            UpdatePlan::Insert { step_id, new_step } => {
                self.insert_step(plan, *step_id, new_step)?
            }
            UpdatePlan::Remove { step_id } => remove_step(plan, *step_id)?,
            UpdatePlan::Revisit { step_id, reason } => revisit_step(plan, *step_id, reason)?,
        };

        Ok(self.outcome(event, state))
    }

    fn build_step(&self, id: usize, spec: &StepSpec) -> Result<Step, Refusal> {
        required("new_step.description", &spec.description)?;
        Ok(Step::from_spec(
            id,
            spec,
            &self.config.default_success_criteria,
        ))
    }

    fn add_step(&self, plan: &mut Plan, spec: &StepSpec) -> Result<PlanEvent, Refusal> {
        let step_id = plan.len() + 1;
        let step = self.build_step(step_id, spec)?;
        info!("Step added: {}", step.description);

        plan.steps.push(step);
        plan.renumber();
        let reopened = reopen_at(plan, step_id);

        Ok(PlanEvent::StepAdded { step_id, reopened })
    }

    /// Inserts after `after`. Any id from the current step through the last
    /// step is accepted, so inserting after the final step appends.
    fn insert_step(
        &self,
        plan: &mut Plan,
        after: usize,
        spec: &StepSpec,
    ) -> Result<PlanEvent, Refusal> {
        if after < plan.current_step {
            return Err(Refusal::ordering(format!(
                "Cannot insert before the current step {}.",
                plan.current_step
            )));
        }
        if after > plan.len() {
            return Err(Refusal::step_not_found(after));
        }

        let step_id = after + 1;
        let step = self.build_step(step_id, spec)?;
        info!("Step inserted after {after}: {}", step.description);

        plan.steps.insert(after, step);
        plan.renumber();
        let reopened = reopen_at(plan, step_id);

        Ok(PlanEvent::StepInserted {
            after,
            step_id,
            reopened,
        })
    }
}

/// Reopens a completed plan at a newly created step.
///
/// Returns whether the plan was reopened. An in-progress plan keeps its
/// current step.
fn reopen_at(plan: &mut Plan, step_id: usize) -> bool {
    if !plan.is_complete() {
        return false;
    }

    plan.status = PlanStatus::InProgress;
    plan.completed_at = None;
    plan.current_step = step_id;
    if let Some(step) = plan.current_mut() {
        step.started_at = Some(Timestamp::now());
    }
    info!("Plan reopened at step {step_id}");
    true
}

fn remove_step(plan: &mut Plan, step_id: usize) -> Result<PlanEvent, Refusal> {
    if step_id <= plan.current_step {
        return Err(Refusal::ordering(format!(
            "Cannot remove step {step_id}: it is the current step or already behind it."
        )));
    }
    if step_id > plan.len() {
        return Err(Refusal::step_not_found(step_id));
    }

    let removed = plan.steps.remove(step_id - 1);
    plan.renumber();
    info!("Step removed: {}", removed.description);

    Ok(PlanEvent::StepRemoved { removed })
}

fn revisit_step(plan: &mut Plan, step_id: usize, reason: &str) -> Result<PlanEvent, Refusal> {
    let reason = required("reason", reason)?;
    if step_id == 0 {
        return Err(Refusal::step_not_found(step_id));
    }
    if step_id > plan.current_step {
        return Err(Refusal::ordering(format!(
            "Step {step_id} has not been reached yet."
        )));
    }

    for step in &mut plan.steps[step_id - 1..] {
        step.reset();
    }
    if let Some(target) = plan.step_mut(step_id) {
        target.output = Some(format!("[Revisiting: {reason}]"));
        target.started_at = Some(Timestamp::now());
    }

    plan.current_step = step_id;
    plan.status = PlanStatus::InProgress;
    plan.completed_at = None;
    plan.renumber();
    info!("Revisiting step {step_id}: {reason}");

    Ok(PlanEvent::Revisited {
        step_id,
        reason: reason.to_string(),
    })
}
