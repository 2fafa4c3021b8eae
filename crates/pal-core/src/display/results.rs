//! Human-readable messages for operation results.
//!
//! These wrappers are the only place controller results become text; the
//! result types themselves carry no presentation.

use std::fmt;

use super::models::StepListing;
use crate::{
    controller::{Outcome, PlanEvent, Response},
    error::{Refusal, RefusalKind},
    learning::RecordOutcome,
};

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.snapshot.plan();

        match &self.event {
            PlanEvent::Created => {
                let Some(plan) = plan else {
                    return write!(f, "✅ Plan created!");
                };
                writeln!(f, "✅ Plan created!")?;
                writeln!(f)?;
                writeln!(f, "🎯 Objective: {}", plan.objective)?;
                if let Some(context) = &plan.context {
                    writeln!(f, "📝 Context: {context}")?;
                }
                writeln!(f)?;
                writeln!(f, "Steps:")?;
                write!(f, "{}", StepListing(&plan.steps))?;
                writeln!(f)?;
                write!(f, "→ Ready to start with Step 1")
            }
            PlanEvent::StepCompleted {
                step_id,
                next_step_id,
            } => {
                writeln!(f, "✅ Step {step_id} complete!")?;
                if let Some(next) = plan.and_then(|p| p.step(*next_step_id)) {
                    writeln!(f)?;
                    writeln!(f, "→ **Step {}**: {}", next.id, next.description)?;
                    write!(f, "  Success criteria: {}", next.success_criteria)?;
                }
                Ok(())
            }
            PlanEvent::PlanCompleted { step_id, duration } => {
                let total = plan.map_or(0, |p| p.len());
                writeln!(f, "✅ Step {step_id} complete!")?;
                writeln!(f)?;
                writeln!(f, "🎉 **Plan Complete!**")?;
                writeln!(f, "All {total} steps finished successfully.")?;
                writeln!(f, "Duration: {duration:#}")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "💡 **Learning opportunity**: Is there a reusable insight from this run?"
                )?;
                write!(
                    f,
                    "If so, propose it; once approved it can be saved with `save_learning()` for future tasks."
                )
            }
            PlanEvent::StepAdded { step_id, reopened } => {
                let description = plan
                    .and_then(|p| p.step(*step_id))
                    .map_or("", |s| s.description.as_str());
                write!(f, "✅ Step {step_id} added: {description}")?;
                if *reopened {
                    write!(f, "\n↩ Plan reopened at Step {step_id}.")?;
                }
                Ok(())
            }
            PlanEvent::StepInserted {
                after,
                step_id,
                reopened,
            } => {
                let description = plan
                    .and_then(|p| p.step(*step_id))
                    .map_or("", |s| s.description.as_str());
                write!(
                    f,
                    "✅ New Step {step_id} inserted after Step {after}: {description}"
                )?;
                if *reopened {
                    write!(f, "\n↩ Plan reopened at Step {step_id}.")?;
                }
                Ok(())
            }
            PlanEvent::StepRemoved { removed } => {
                let remaining = plan.map_or(0, |p| p.len());
                writeln!(f, "✅ Removed: {}", removed.description)?;
                write!(f, "Plan now has {remaining} steps.")
            }
            PlanEvent::Revisited { step_id, reason } => {
                writeln!(f, "🔄 Revisiting Step {step_id}")?;
                writeln!(f, "Reason: {reason}")?;
                write!(f, "Progress reset to this step.")
            }
            PlanEvent::StepBlocked {
                step_id,
                blocker,
                suggestion,
            } => {
                writeln!(f, "⚠️ Step {step_id} is blocked")?;
                writeln!(f)?;
                writeln!(f, "**Blocker**: {blocker}")?;
                if let Some(suggestion) = suggestion {
                    writeln!(f, "**Suggested resolution**: {suggestion}")?;
                }
                writeln!(f)?;
                writeln!(f, "**Options**:")?;
                writeln!(f, "  - Resolve the blocker and call complete_step()")?;
                writeln!(
                    f,
                    "  - Use update_plan(action='revisit', ...) to try a different approach"
                )?;
                write!(f, "  - Use reset_plan(confirm=true) to start fresh")
            }
            PlanEvent::StatusReported => write!(f, "{}", self.snapshot),
            PlanEvent::Reset => write!(f, "🗑️ Plan cleared. Ready to create a new plan."),
            PlanEvent::LearningSaved { learning, outcome } => match outcome {
                RecordOutcome::Saved => {
                    writeln!(f, "💡 Learning saved!")?;
                    writeln!(f)?;
                    writeln!(f, "**{}**", learning.title)?;
                    writeln!(f, "{}", learning.learning)?;
                    writeln!(f)?;
                    write!(f, "_Applies to: {}_", learning.applies_to)
                }
                RecordOutcome::AlreadyExists => write!(
                    f,
                    "💡 A learning titled \"{}\" is already saved; nothing changed.",
                    learning.title
                ),
            },
        }
    }
}

/// Message form of a refusal: marker, detail, and recovery hint.
pub struct RefusalMessage<'a>(pub &'a Refusal);

impl<'a> fmt::Display for RefusalMessage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.0.kind {
            RefusalKind::Guard => "⚠️",
            RefusalKind::NoPlan
            | RefusalKind::Ordering
            | RefusalKind::Validation
            | RefusalKind::NotFound
            | RefusalKind::Recorder => "❌",
        };
        write!(f, "{marker} {}", self.0.detail)?;
        if let Some(hint) = &self.0.hint {
            write!(f, "\n{hint}")?;
        }
        Ok(())
    }
}

/// Message form of any controller response.
pub struct ResponseMessage<'a>(pub &'a Response);

impl<'a> fmt::Display for ResponseMessage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(outcome) => write!(f, "{outcome}"),
            Err(refusal) => write!(f, "{}", RefusalMessage(refusal)),
        }
    }
}

/// Renders a response into the text relayed to the driving caller.
pub fn render(response: &Response) -> String {
    ResponseMessage(response).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_message_includes_hint() {
        let refusal = Refusal::guard("This will clear the current plan and all progress.")
            .with_hint("To confirm, call reset_plan(confirm=true).");
        let text = RefusalMessage(&refusal).to_string();
        assert_eq!(
            text,
            "⚠️ This will clear the current plan and all progress.\nTo confirm, call reset_plan(confirm=true)."
        );
    }

    #[test]
    fn test_refusal_message_markers() {
        let text = RefusalMessage(&Refusal::step_not_found(9)).to_string();
        assert_eq!(text, "❌ Step 9 not found.");
    }
}
