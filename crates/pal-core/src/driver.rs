//! The capability interface between a driving caller and the controller.
//!
//! A driving caller is anything that decides which plan operation to invoke
//! next: a language model emitting tool calls, a script, or a test. It sees
//! the controller only through the fixed method set of [`PlanTools`], and it
//! receives every result back, rendered or typed, before deciding again.
//!
//! ```rust
//! use pal_core::{
//!     controller::PlanController,
//!     driver::{drive, Operation, ScriptedCaller, Session},
//!     models::{PlanStatus, SessionState, StepSpec},
//!     params::{CompleteStep, CreatePlan},
//! };
//!
//! let controller = PlanController::default();
//! let mut state = SessionState::new("scripted");
//! let mut caller = ScriptedCaller::new(vec![
//!     Operation::CreatePlan(CreatePlan {
//!         objective: "Write the report".to_string(),
//!         steps: vec![StepSpec::new("Draft")],
//!         context: None,
//!     }),
//!     Operation::CompleteStep(CompleteStep { output: "Draft attached".to_string() }),
//! ]);
//!
//! let transcript = drive(&mut Session::new(&controller, &mut state), &mut caller);
//! assert_eq!(transcript.len(), 2);
//! assert_eq!(state.status(), PlanStatus::Complete);
//! ```

use std::collections::VecDeque;

use log::{debug, error};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    controller::{PlanController, PlanEvent, Response},
    display::render,
    error::Refusal,
    learning::{Approval, LearningRecorder},
    models::SessionState,
    params::{BlockStep, CompleteStep, CreatePlan, ResetPlan, SaveLearning, UpdatePlan},
};

/// Tool names accepted by [`Operation::from_tool_call`].
pub const TOOL_NAMES: [&str; 7] = [
    "create_plan",
    "complete_step",
    "update_plan",
    "block_step",
    "get_status",
    "reset_plan",
    "save_learning",
];

/// One call on the capability interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum Operation {
    CreatePlan(CreatePlan),
    CompleteStep(CompleteStep),
    UpdatePlan(UpdatePlan),
    BlockStep(BlockStep),
    GetStatus,
    ResetPlan(ResetPlan),
    SaveLearning(SaveLearning),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreatePlan(_) => "create_plan",
            Operation::CompleteStep(_) => "complete_step",
            Operation::UpdatePlan(_) => "update_plan",
            Operation::BlockStep(_) => "block_step",
            Operation::GetStatus => "get_status",
            Operation::ResetPlan(_) => "reset_plan",
            Operation::SaveLearning(_) => "save_learning",
        }
    }

    /// Whether the operation can change the plan store.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::GetStatus | Operation::SaveLearning(_))
    }

    /// Validates a raw function call at the boundary.
    ///
    /// Unknown names and malformed arguments become validation refusals, so
    /// the caller can correct itself instead of failing.
    pub fn from_tool_call(name: &str, arguments: Value) -> Result<Self, Refusal> {
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        match name {
            "create_plan" => parse(name, arguments).map(Operation::CreatePlan),
            "complete_step" => parse(name, arguments).map(Operation::CompleteStep),
            "update_plan" => parse(name, arguments).map(Operation::UpdatePlan),
            "block_step" => parse(name, arguments).map(Operation::BlockStep),
            "get_status" => Ok(Operation::GetStatus),
            "reset_plan" => parse(name, arguments).map(Operation::ResetPlan),
            "save_learning" => parse(name, arguments).map(Operation::SaveLearning),
            other => Err(Refusal::validation(format!("Unknown tool: {other}"))
                .with_hint(format!("Available tools: {}", TOOL_NAMES.join(", ")))),
        }
    }
}

fn parse<T: DeserializeOwned>(name: &str, arguments: Value) -> Result<T, Refusal> {
    serde_json::from_value(arguments)
        .map_err(|e| Refusal::validation(format!("Invalid arguments for {name}: {e}")))
}

/// The fixed, statically-typed operation surface.
pub trait PlanTools {
    fn create_plan(&mut self, params: &CreatePlan) -> Response;
    fn complete_step(&mut self, params: &CompleteStep) -> Response;
    fn update_plan(&mut self, params: &UpdatePlan) -> Response;
    fn block_step(&mut self, params: &BlockStep) -> Response;
    fn get_status(&self) -> Response;
    fn reset_plan(&mut self, params: &ResetPlan) -> Response;
    fn save_learning(&mut self, params: &SaveLearning) -> Response;

    /// Dispatches an [`Operation`] to the matching method.
    fn apply(&mut self, operation: &Operation) -> Response {
        match operation {
            Operation::CreatePlan(params) => self.create_plan(params),
            Operation::CompleteStep(params) => self.complete_step(params),
            Operation::UpdatePlan(params) => self.update_plan(params),
            Operation::BlockStep(params) => self.block_step(params),
            Operation::GetStatus => self.get_status(),
            Operation::ResetPlan(params) => self.reset_plan(params),
            Operation::SaveLearning(params) => self.save_learning(params),
        }
    }
}

/// A controller bound to one session's store for the duration of a turn.
pub struct Session<'a> {
    controller: &'a PlanController,
    state: &'a mut SessionState,
    recorder: Option<&'a dyn LearningRecorder>,
    approval: Approval,
}

impl<'a> Session<'a> {
    pub fn new(controller: &'a PlanController, state: &'a mut SessionState) -> Self {
        Self {
            controller,
            state,
            recorder: None,
            approval: Approval::Denied,
        }
    }

    /// Enables `save_learning`, persisting through `recorder` when `approval`
    /// is granted.
    pub fn with_recorder(mut self, recorder: &'a dyn LearningRecorder, approval: Approval) -> Self {
        self.recorder = Some(recorder);
        self.approval = approval;
        self
    }

    pub fn state(&self) -> &SessionState {
        &*self.state
    }
}

impl PlanTools for Session<'_> {
    fn create_plan(&mut self, params: &CreatePlan) -> Response {
        self.controller.create_plan(self.state, params)
    }

    fn complete_step(&mut self, params: &CompleteStep) -> Response {
        self.controller.complete_step(self.state, params)
    }

    fn update_plan(&mut self, params: &UpdatePlan) -> Response {
        self.controller.update_plan(self.state, params)
    }

    fn block_step(&mut self, params: &BlockStep) -> Response {
        self.controller.block_step(self.state, params)
    }

    fn get_status(&self) -> Response {
        self.controller.get_status(&*self.state)
    }

    fn reset_plan(&mut self, params: &ResetPlan) -> Response {
        self.controller.reset_plan(self.state, params)
    }

    fn save_learning(&mut self, params: &SaveLearning) -> Response {
        let recorder = self.recorder.ok_or_else(|| {
            Refusal::recorder("No learning recorder is configured for this session.")
        })?;
        let learning = self
            .controller
            .capture_learning(self.state, params, self.approval)?;
        let outcome = recorder.record(&learning).map_err(|e| {
            error!("Failed to save learning '{}': {e}", learning.title);
            Refusal::recorder(format!("Failed to save learning: {e}"))
        })?;

        Ok(self
            .controller
            .outcome(PlanEvent::LearningSaved { learning, outcome }, self.state))
    }
}

/// Decides the next operation after seeing the previous response.
pub trait DrivingCaller {
    /// Returns `None` to end the exchange.
    fn next_call(&mut self, last: Option<&Response>) -> Option<Operation>;
}

/// Replays a fixed list of operations regardless of responses.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCaller {
    calls: VecDeque<Operation>,
}

impl ScriptedCaller {
    pub fn new(calls: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            calls: calls.into_iter().collect(),
        }
    }
}

impl DrivingCaller for ScriptedCaller {
    fn next_call(&mut self, _last: Option<&Response>) -> Option<Operation> {
        self.calls.pop_front()
    }
}

/// One operation and its result, as relayed back to the caller.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub operation: Operation,
    pub response: Response,
    /// Rendered text of `response`
    pub message: String,
}

/// Runs the decide/apply/relay loop until the caller stops.
///
/// Calls are strictly sequential: each response is handed to the caller
/// before the next operation is requested.
pub fn drive<T, C>(tools: &mut T, caller: &mut C) -> Vec<Exchange>
where
    T: PlanTools + ?Sized,
    C: DrivingCaller + ?Sized,
{
    let mut transcript: Vec<Exchange> = Vec::new();

    loop {
        let last = transcript.last().map(|exchange| &exchange.response);
        let Some(operation) = caller.next_call(last) else {
            break;
        };

        let response = tools.apply(&operation);
        if let Err(refusal) = &response {
            debug!("{} refused ({}): {refusal}", operation.name(), refusal.kind);
        }
        let message = render(&response);
        transcript.push(Exchange {
            operation,
            response,
            message,
        });
    }

    transcript
}
