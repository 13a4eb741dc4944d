//! Capabilities handed to the execution pipeline.
//!
//! The evaluator session and the pretty-printer are passed in explicitly so
//! a host can share one session across runs and tests can substitute fakes.

use std::future::Future;

use crate::execute::outcome::ExecutionRecord;

/// Failure raised by an evaluator or pretty-printer.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalFailure {
    /// A failure that names itself.
    Error { name: String, message: String },

    /// Any other failure value.
    Value(serde_json::Value),
}

impl EvalFailure {
    /// Create a named failure.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EvalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error { name, message } => write!(f, "{}: {}", name, message),
            Self::Value(value) => write!(f, "{}", value),
        }
    }
}

impl std::error::Error for EvalFailure {}

impl From<serde_json::Value> for EvalFailure {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

/// A remote evaluation session.
///
/// Requests are issued strictly one after another; implementations may rely
/// on receiving them in document order.
pub trait Evaluator {
    /// Evaluate `code`, optionally within `context` (e.g. a namespace).
    fn evaluate(
        &self,
        code: &str,
        context: Option<&str>,
    ) -> impl Future<Output = Result<String, EvalFailure>> + Send;
}

impl<T: Evaluator + Sync> Evaluator for &T {
    fn evaluate(
        &self,
        code: &str,
        context: Option<&str>,
    ) -> impl Future<Output = Result<String, EvalFailure>> + Send {
        (**self).evaluate(code, context)
    }
}

/// Renders a raw evaluation result for display.
pub trait PrettyPrinter {
    /// Pretty-print `text`.
    fn pretty_print(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, EvalFailure>> + Send;
}

impl<T: PrettyPrinter + Sync> PrettyPrinter for &T {
    fn pretty_print(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, EvalFailure>> + Send {
        (**self).pretty_print(text)
    }
}

/// Pretty-printer that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PrettyPrinter for Passthrough {
    async fn pretty_print(&self, text: &str) -> Result<String, EvalFailure> {
        Ok(text.to_string())
    }
}

/// Callback trait for execution progress reporting.
pub trait ExecutionCallback: Send + Sync {
    /// Called when a cell enters the running state.
    fn on_cell_started(&self, index: usize);

    /// Called when a cell completes, successfully or not.
    fn on_cell_completed(&self, record: &ExecutionRecord);
}
