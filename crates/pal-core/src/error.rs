//! Error types for the plan controller and its hosting layer.
//!
//! Two families live here:
//!
//! - [`Refusal`]: a controller decision not to mutate the plan store. Refusals
//!   are ordinary values returned to the driving caller, never failures of the
//!   process.
//! - [`PlannerError`]: infrastructure failures in the hosting layer (storage,
//!   file system, task joins).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Classification of controller refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalKind {
    /// The operation needs a plan and the session has none.
    NoPlan,
    /// A precondition guard rejected the call (active plan, unconfirmed reset,
    /// completed step or plan).
    Guard,
    /// The call targets a step on the wrong side of the current step.
    Ordering,
    /// A required argument is missing, blank, or malformed.
    Validation,
    /// The referenced step does not exist.
    NotFound,
    /// The learning recorder is missing or failed to persist a record.
    Recorder,
}

impl RefusalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefusalKind::NoPlan => "no_plan",
            RefusalKind::Guard => "guard",
            RefusalKind::Ordering => "ordering",
            RefusalKind::Validation => "validation",
            RefusalKind::NotFound => "not_found",
            RefusalKind::Recorder => "recorder",
        }
    }
}

impl fmt::Display for RefusalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured refusal produced by the controller.
///
/// The store is guaranteed to be untouched whenever a refusal is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct Refusal {
    pub kind: RefusalKind,
    pub detail: String,
    /// Recovery guidance for the caller, if any applies.
    pub hint: Option<String>,
}

impl Refusal {
    fn new(kind: RefusalKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            hint: None,
        }
    }

    pub fn no_plan() -> Self {
        Self::new(RefusalKind::NoPlan, "No plan exists.")
            .with_hint("Create one first with create_plan().")
    }

    pub fn guard(detail: impl Into<String>) -> Self {
        Self::new(RefusalKind::Guard, detail)
    }

    pub fn ordering(detail: impl Into<String>) -> Self {
        Self::new(RefusalKind::Ordering, detail)
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(RefusalKind::Validation, detail)
    }

    pub fn step_not_found(step_id: usize) -> Self {
        Self::new(RefusalKind::NotFound, format!("Step {step_id} not found."))
    }

    pub fn recorder(detail: impl Into<String>) -> Self {
        Self::new(RefusalKind::Recorder, detail)
    }

    /// Attach recovery guidance.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Comprehensive error type for hosting-layer failures.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// A blocking storage task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for hosting-layer operations
pub type Result<T> = std::result::Result<T, PlannerError>;
