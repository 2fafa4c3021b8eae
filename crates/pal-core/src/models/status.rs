//! Status enumerations for plans and steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a session's plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// The session holds no plan
    #[default]
    NoPlan,

    /// Steps remain to be completed
    InProgress,

    /// The final step has been completed
    Complete,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "no_plan" | "noplan" => Ok(PlanStatus::NoPlan),
            "in_progress" | "inprogress" => Ok(PlanStatus::InProgress),
            "complete" => Ok(PlanStatus::Complete),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::NoPlan => "no_plan",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Complete => "complete",
        }
    }
}

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step is waiting to be completed
    #[default]
    Pending,

    /// Step has been completed with evidence
    Complete,

    /// Step cannot progress until a blocker is resolved
    Blocked,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "complete" => Ok(StepStatus::Complete),
            "blocked" => Ok(StepStatus::Blocked),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Complete => "complete",
            StepStatus::Blocked => "blocked",
        }
    }

    /// Single-character marker used on the status board.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pal_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Pending.icon(), "○");
    /// assert_eq!(StepStatus::Complete.icon(), "✓");
    /// assert_eq!(StepStatus::Blocked.icon(), "✗");
    /// ```
    pub fn icon(&self) -> &'static str {
        match self {
            StepStatus::Pending => "○",
            StepStatus::Complete => "✓",
            StepStatus::Blocked => "✗",
        }
    }
}
