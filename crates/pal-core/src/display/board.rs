//! The status board rendered for `get_status`.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use super::models::preview;
use crate::{
    controller::Snapshot,
    models::{Plan, PlanStatus, Progress, StepStatus},
};

const RULE_WIDTH: usize = 50;

/// Horizontal progress bar, e.g. `[██████░░░░]`.
pub struct ProgressBar {
    pub progress: Progress,
    pub width: usize,
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = (self.progress.percent() * self.width / 100).min(self.width);
        write!(
            f,
            "[{}{}] {}/{} ({}%)",
            "█".repeat(filled),
            "░".repeat(self.width - filled),
            self.progress.completed,
            self.progress.total,
            self.progress.percent()
        )
    }
}

/// Board shown when the session has no plan.
pub struct NoPlanBoard;

impl fmt::Display for NoPlanBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📋 No active plan.")?;
        writeln!(f)?;
        writeln!(f, "Use create_plan() to begin. Example:")?;
        writeln!(f, "```")?;
        writeln!(f, "create_plan(")?;
        writeln!(f, "    objective=\"Your goal here\",")?;
        writeln!(f, "    steps=[")?;
        writeln!(
            f,
            "        {{\"description\": \"First step\", \"success_criteria\": \"How to verify\"}},"
        )?;
        writeln!(
            f,
            "        {{\"description\": \"Second step\", \"success_criteria\": \"How to verify\"}},"
        )?;
        writeln!(f, "    ]")?;
        writeln!(f, ")")?;
        write!(f, "```")
    }
}

/// Minute-precision time in the system zone, e.g. `2025-03-01 14:05 CET`.
fn local_time(timestamp: &Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%Y-%m-%d %H:%M %Z")
        .to_string()
}

fn fmt_plan(plan: &Plan, snapshot: &Snapshot, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rule = "═".repeat(RULE_WIDTH);

    writeln!(f, "{rule}")?;
    writeln!(f, "🎯 OBJECTIVE: {}", plan.objective)?;
    writeln!(f, "📊 STATUS: {}", plan.status.as_str().to_uppercase())?;
    if let Some(context) = &plan.context {
        writeln!(f, "📝 Context: {context}")?;
    }
    writeln!(f, "🕒 Created: {}", local_time(&plan.created_at))?;
    if let Some(completed_at) = &plan.completed_at {
        writeln!(f, "🏁 Completed: {}", local_time(completed_at))?;
    }

    writeln!(f)?;
    writeln!(f, "STEPS:")?;
    writeln!(f)?;

    for step in &plan.steps {
        let is_current = plan.status == PlanStatus::InProgress && step.id == plan.current_step;
        let marker = if is_current { " ◀ CURRENT" } else { "" };
        writeln!(f, "  {step}{marker}")?;

        if is_current {
            writeln!(f, "       ✓ Must satisfy: {}", step.success_criteria)?;
        }

        if let Some(output) = &step.output {
            match step.status {
                StepStatus::Complete => {
                    writeln!(
                        f,
                        "       └─ {}",
                        preview(output, snapshot.style.preview_chars)
                    )?;
                }
                StepStatus::Blocked | StepStatus::Pending => writeln!(f, "       └─ {output}")?,
            }
        }
    }

    writeln!(f)?;
    writeln!(
        f,
        "Progress: {}",
        ProgressBar {
            progress: plan.progress(),
            width: snapshot.style.progress_width,
        }
    )?;
    write!(f, "{rule}")
}

/// The status board: objective, context, every step with its marker, the
/// highlighted current step, and overall progress.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plan {
            Some(plan) => fmt_plan(plan, self, f),
            None => write!(f, "{}", NoPlanBoard),
        }
    }
}
