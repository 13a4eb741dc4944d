//! Sequential execution pipeline.
//!
//! Runs executable cells one at a time in document order. Later forms may
//! depend on side effects of earlier ones in the shared evaluator session,
//! so cell n+1 is never started before cell n has completed. A failing cell
//! is recorded and the run moves on.

use std::time::Instant;

use futures::stream::{self, Stream, StreamExt};

use crate::cell::Cell;
use crate::format::NotebookFormat;

use super::context::{EvalFailure, Evaluator, ExecutionCallback, PrettyPrinter};
use super::outcome::{CellOutcome, ErrorDescriptor, ExecutionRecord, OutputItem};
use super::render;

/// Pipeline that evaluates cells through one evaluator session.
pub struct ExecutionPipeline<E, P> {
    /// Remote evaluator session, reused for every cell
    evaluator: E,
    /// Pretty-printer for successful results
    printer: P,
    /// Format providing the code fence language
    format: NotebookFormat,
    /// Evaluation context forwarded with each request
    context: Option<String>,
    /// Execution callback for progress reporting
    callback: Option<Box<dyn ExecutionCallback>>,
}

impl<E: Evaluator, P: PrettyPrinter> ExecutionPipeline<E, P> {
    /// Create a new pipeline.
    pub fn new(evaluator: E, printer: P, format: NotebookFormat) -> Self {
        Self {
            evaluator,
            printer,
            format,
            context: None,
            callback: None,
        }
    }

    /// Forward `context` (e.g. a namespace) with every evaluation request.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the execution callback for progress reporting.
    pub fn with_callback(mut self, callback: impl ExecutionCallback + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The evaluator session.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run the executable cells of `cells`, yielding one record per cell in order.
    ///
    /// The stream is lazy: each cell is evaluated when the stream is polled
    /// past the previous record. Prose cells are skipped.
    pub fn run<'a>(&'a self, cells: &'a [Cell]) -> impl Stream<Item = ExecutionRecord> + 'a {
        let executable = cells.iter().enumerate().filter(|(index, cell)| {
            if !cell.is_executable() {
                tracing::debug!("Skipping prose cell #{}", index);
            }
            cell.is_executable()
        });

        stream::iter(executable).then(move |(index, cell)| self.execute_cell(index, cell))
    }

    /// Run all executable cells and collect their records.
    pub async fn run_all(&self, cells: &[Cell]) -> Vec<ExecutionRecord> {
        self.run(cells).collect().await
    }

    /// Execute a single cell.
    ///
    /// Never fails: evaluation and rendering failures become the record's
    /// `Err` outcome.
    pub async fn execute_cell(&self, index: usize, cell: &Cell) -> ExecutionRecord {
        let started_at = Instant::now();
        tracing::debug!("Cell #{} started", index);

        if let Some(ref callback) = self.callback {
            callback.on_cell_started(index);
        }

        let outcome: CellOutcome = self
            .evaluate_and_render(&cell.content)
            .await
            .map_err(ErrorDescriptor::from);

        let record = ExecutionRecord {
            cell_index: index,
            started_at,
            ended_at: Instant::now(),
            outcome,
        };

        match &record.outcome {
            Ok(outputs) => tracing::debug!(
                "Cell #{} completed with {} outputs in {:?}",
                index,
                outputs.len(),
                record.duration()
            ),
            Err(e) => tracing::warn!("Cell #{} failed: {}: {}", index, e.name, e.message),
        }

        if let Some(ref callback) = self.callback {
            callback.on_cell_completed(&record);
        }

        record
    }

    /// Evaluate one form and render the result.
    async fn evaluate_and_render(&self, code: &str) -> Result<Vec<OutputItem>, EvalFailure> {
        let raw = self
            .evaluator
            .evaluate(code, self.context.as_deref())
            .await?;
        let pretty = self.printer.pretty_print(&raw).await?;

        Ok(render::result_outputs(
            &raw,
            &pretty,
            &self.format.code_language,
        ))
    }
}
