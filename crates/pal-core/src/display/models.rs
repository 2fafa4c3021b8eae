//! Display implementations for domain models.

use std::fmt;

use crate::models::{PlanStatus, Step, StepStatus};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compact one-line form: icon, id, description.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.status.icon(), self.id, self.description)
    }
}

/// Numbered step listing with success criteria, used when a plan is created.
pub struct StepListing<'a>(pub &'a [Step]);

impl<'a> fmt::Display for StepListing<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.0 {
            writeln!(f, "  {}. {}", step.id, step.description)?;
            writeln!(f, "     ✓ Done when: {}", step.success_criteria)?;
        }
        Ok(())
    }
}

/// Cuts text to `max` characters, marking the cut with an ellipsis.
pub(crate) fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
