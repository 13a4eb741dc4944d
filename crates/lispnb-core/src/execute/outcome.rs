//! Per-cell execution records.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::execute::context::EvalFailure;

/// Name used for failures that do not carry one.
pub const GENERIC_ERROR_NAME: &str = "error";

/// One rendered representation of an execution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    /// MIME tag (e.g. `text/plain`)
    pub mime: String,

    /// Rendered text
    pub payload: String,
}

impl OutputItem {
    /// Create an output item.
    pub fn new(mime: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            payload: payload.into(),
        }
    }
}

/// Structured error shown in place of outputs for a failed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Error name (e.g. `EvaluationError`, or `error` for bare values)
    pub name: String,

    /// Human-readable message
    pub message: String,
}

impl From<&EvalFailure> for ErrorDescriptor {
    fn from(failure: &EvalFailure) -> Self {
        match failure {
            EvalFailure::Error { name, message } => Self {
                name: name.clone(),
                message: message.clone(),
            },
            // serde_json maps keep keys sorted, so the dump is stable.
            EvalFailure::Value(value) => Self {
                name: GENERIC_ERROR_NAME.to_string(),
                message: value.to_string(),
            },
        }
    }
}

impl From<EvalFailure> for ErrorDescriptor {
    fn from(failure: EvalFailure) -> Self {
        Self::from(&failure)
    }
}

/// Outcome of one cell: rendered outputs, or the error that replaced them.
pub type CellOutcome = Result<Vec<OutputItem>, ErrorDescriptor>;

/// Result of one evaluation attempt for one executable cell.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    /// Position of the cell in the slice given to the pipeline
    pub cell_index: usize,

    /// When the cell entered the running state
    pub started_at: Instant,

    /// When the cell completed
    pub ended_at: Instant,

    /// Outputs or error
    pub outcome: CellOutcome,
}

impl ExecutionRecord {
    /// Wall time spent on the cell.
    pub fn duration(&self) -> Duration {
        self.ended_at.duration_since(self.started_at)
    }

    /// Whether the cell produced outputs.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Outputs, if the cell succeeded.
    pub fn outputs(&self) -> Option<&[OutputItem]> {
        self.outcome.as_deref().ok()
    }

    /// Error, if the cell failed.
    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.outcome.as_ref().err()
    }
}
