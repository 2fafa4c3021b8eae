//! Session-scoped plan store.

use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus};

/// The plan store owned by exactly one session.
///
/// The controller receives this as its context parameter; nothing else
/// mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    /// Identifier of the owning session
    pub session_id: String,

    /// The current plan, if any
    #[serde(default)]
    pub plan: Option<Plan>,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            plan: None,
        }
    }

    /// Plan-level status, `NoPlan` when the store is empty.
    pub fn status(&self) -> PlanStatus {
        self.plan
            .as_ref()
            .map_or(PlanStatus::NoPlan, |plan| plan.status)
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }
}
