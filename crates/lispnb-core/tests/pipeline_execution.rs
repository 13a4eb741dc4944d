//! Integration tests for sequential cell execution.
//!
//! Drives the pipeline with scripted evaluator and printer sessions.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::StreamExt;
use lispnb_core::execute::render::mime;
use lispnb_core::{
    Cell, EvalFailure, Evaluator, ExecutionCallback, ExecutionPipeline, ExecutionRecord,
    NotebookFormat, OutputItem, Passthrough, PrettyPrinter,
};

// =============================================================================
// Test Helpers
// =============================================================================

/// Evaluator that answers from a script and records every request.
#[derive(Default)]
struct ScriptedEvaluator {
    responses: HashMap<String, Result<String, EvalFailure>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedEvaluator {
    fn new() -> Self {
        Self::default()
    }

    fn respond(mut self, code: &str, response: Result<&str, EvalFailure>) -> Self {
        self.responses
            .insert(code.to_string(), response.map(str::to_string));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(code, _)| code.clone())
            .collect()
    }
}

impl Evaluator for ScriptedEvaluator {
    async fn evaluate(&self, code: &str, context: Option<&str>) -> Result<String, EvalFailure> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .push((code.to_string(), context.map(str::to_string)));

        tokio::time::sleep(Duration::from_millis(2)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.responses
            .get(code)
            .cloned()
            .unwrap_or_else(|| Ok(code.to_string()))
    }
}

/// Printer that always fails.
struct BrokenPrinter;

impl PrettyPrinter for BrokenPrinter {
    async fn pretty_print(&self, _text: &str) -> Result<String, EvalFailure> {
        Err(EvalFailure::error("PrinterError", "cannot print"))
    }
}

/// Printer that upper-cases its input.
struct ShoutingPrinter;

impl PrettyPrinter for ShoutingPrinter {
    async fn pretty_print(&self, text: &str) -> Result<String, EvalFailure> {
        Ok(text.to_uppercase())
    }
}

/// Callback that logs lifecycle events.
#[derive(Clone, Default)]
struct EventLog(std::sync::Arc<Mutex<Vec<String>>>);

impl ExecutionCallback for EventLog {
    fn on_cell_started(&self, index: usize) {
        self.0.lock().unwrap().push(format!("start {}", index));
    }

    fn on_cell_completed(&self, record: &ExecutionRecord) {
        let status = if record.is_success() { "ok" } else { "err" };
        self.0
            .lock()
            .unwrap()
            .push(format!("done {} {}", record.cell_index, status));
    }
}

fn code_cells(forms: &[&str]) -> Vec<Cell> {
    let format = NotebookFormat::default();
    forms.iter().map(|f| Cell::executable(*f, &format)).collect()
}

fn pipeline<E: Evaluator>(evaluator: E) -> ExecutionPipeline<E, Passthrough> {
    ExecutionPipeline::new(evaluator, Passthrough, NotebookFormat::default())
}

// =============================================================================
// Ordering and Isolation
// =============================================================================

#[tokio::test]
async fn test_cells_run_in_order_one_at_a_time() {
    let evaluator = ScriptedEvaluator::new();
    let pipeline = pipeline(&evaluator);
    let cells = code_cells(&["(def a 1)", "(def b 2)", "(+ a b)"]);

    let records = pipeline.run_all(&cells).await;

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.cell_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(evaluator.calls(), vec!["(def a 1)", "(def b 2)", "(+ a b)"]);
    assert_eq!(evaluator.max_in_flight.load(Ordering::SeqCst), 1);

    for pair in records.windows(2) {
        assert!(pair[1].started_at >= pair[0].ended_at);
    }
    for record in &records {
        assert!(record.started_at <= record.ended_at);
    }
}

#[tokio::test]
async fn test_failing_cell_does_not_stop_the_run() {
    let evaluator = ScriptedEvaluator::new()
        .respond("(/ 1 0)", Err(EvalFailure::error("ArithmeticException", "Divide by zero")));
    let pipeline = pipeline(&evaluator);
    let cells = code_cells(&["(+ 1 2)", "(/ 1 0)", "(+ 3 4)"]);

    let records = pipeline.run_all(&cells).await;

    assert_eq!(records.len(), 3);
    assert!(records[0].is_success());
    let error = records[1].error().expect("second cell should fail");
    assert_eq!(error.name, "ArithmeticException");
    assert_eq!(error.message, "Divide by zero");
    assert!(records[2].is_success());
    assert_eq!(evaluator.calls().len(), 3);
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let evaluator = ScriptedEvaluator::new();
    let pipeline = pipeline(&evaluator);
    let cells = code_cells(&["(a)", "(b)", "(c)"]);

    let first: Vec<_> = pipeline.run(&cells).take(1).collect().await;

    assert_eq!(first.len(), 1);
    assert_eq!(evaluator.calls(), vec!["(a)"]);
}

#[tokio::test]
async fn test_prose_cells_are_skipped() {
    let format = NotebookFormat::default();
    let cells = vec![
        Cell::prose("intro", &format),
        Cell::executable("(+ 1 2)", &format),
        Cell::prose("outro", &format),
        Cell::executable("(+ 3 4)", &format),
    ];
    let evaluator = ScriptedEvaluator::new();
    let pipeline = pipeline(&evaluator);

    let records = pipeline.run_all(&cells).await;

    assert_eq!(
        records.iter().map(|r| r.cell_index).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(evaluator.calls(), vec!["(+ 1 2)", "(+ 3 4)"]);
}

// =============================================================================
// Outputs
// =============================================================================

#[tokio::test]
async fn test_success_outputs() {
    let evaluator = ScriptedEvaluator::new().respond("(+ 1 2)", Ok("3"));
    let pipeline = pipeline(&evaluator);

    let records = pipeline.run_all(&code_cells(&["(+ 1 2)"])).await;

    assert_eq!(
        records[0].outputs().unwrap(),
        &[
            OutputItem::new(mime::PLAIN, "3"),
            OutputItem::new(mime::MARKDOWN, "```clojure\n3\n```"),
            OutputItem::new(mime::EDN, "3"),
        ]
    );
}

#[tokio::test]
async fn test_html_result_adds_html_output() {
    let evaluator = ScriptedEvaluator::new()
        .respond("(page)", Ok("\"<html><body>hi</body></html>\""));
    let pipeline = pipeline(&evaluator);

    let records = pipeline.run_all(&code_cells(&["(page)"])).await;
    let outputs = records[0].outputs().unwrap();

    assert_eq!(outputs.len(), 4);
    assert_eq!(outputs[0].payload, "\"<html><body>hi</body></html>\"");
    assert_eq!(
        outputs[3],
        OutputItem::new(mime::HTML, "<html><body>hi</body></html>")
    );
}

#[tokio::test]
async fn test_markdown_output_uses_pretty_printer() {
    let evaluator = ScriptedEvaluator::new().respond("(kw)", Ok(":a"));
    let pipeline = ExecutionPipeline::new(&evaluator, ShoutingPrinter, NotebookFormat::default());

    let records = pipeline.run_all(&code_cells(&["(kw)"])).await;
    let outputs = records[0].outputs().unwrap();

    assert_eq!(outputs[0].payload, ":a");
    assert_eq!(outputs[1].payload, "```clojure\n:A\n```");
    assert_eq!(outputs[2].payload, ":a");
}

#[tokio::test]
async fn test_fence_language_follows_format() {
    let evaluator = ScriptedEvaluator::new().respond("(x)", Ok("1"));
    let format = NotebookFormat::new(";", "scheme");
    let pipeline = ExecutionPipeline::new(&evaluator, Passthrough, format);

    let records = pipeline.run_all(&code_cells(&["(x)"])).await;

    assert_eq!(records[0].outputs().unwrap()[1].payload, "```scheme\n1\n```");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_non_error_failure_value_falls_back_to_json() {
    let evaluator = ScriptedEvaluator::new().respond(
        "(boom)",
        Err(EvalFailure::Value(serde_json::json!({"status": ["eval-error"], "id": 4}))),
    );
    let pipeline = pipeline(&evaluator);

    let records = pipeline.run_all(&code_cells(&["(boom)"])).await;
    let error = records[0].error().unwrap();

    assert_eq!(error.name, "error");
    assert_eq!(error.message, r#"{"id":4,"status":["eval-error"]}"#);
}

#[tokio::test]
async fn test_printer_failure_is_a_cell_failure() {
    let evaluator = ScriptedEvaluator::new();
    let pipeline = ExecutionPipeline::new(&evaluator, BrokenPrinter, NotebookFormat::default());

    let records = pipeline.run_all(&code_cells(&["(a)", "(b)"])).await;

    assert_eq!(records.len(), 2);
    for record in &records {
        let error = record.error().unwrap();
        assert_eq!(error.name, "PrinterError");
    }
}

// =============================================================================
// Context and Callbacks
// =============================================================================

#[tokio::test]
async fn test_context_is_forwarded() {
    let evaluator = ScriptedEvaluator::new();
    let pipeline = pipeline(&evaluator).with_context("user");

    pipeline.run_all(&code_cells(&["(a)"])).await;

    let calls = evaluator.calls.lock().unwrap();
    assert_eq!(calls[0].1.as_deref(), Some("user"));
}

#[tokio::test]
async fn test_callback_sees_each_cell_complete_before_next_starts() {
    let evaluator = ScriptedEvaluator::new()
        .respond("(b)", Err(EvalFailure::Value(serde_json::Value::Null)));
    let log = EventLog::default();
    let pipeline = pipeline(&evaluator).with_callback(log.clone());

    pipeline.run_all(&code_cells(&["(a)", "(b)", "(c)"])).await;

    assert_eq!(
        *log.0.lock().unwrap(),
        vec![
            "start 0", "done 0 ok", "start 1", "done 1 err", "start 2", "done 2 ok"
        ]
    );
}
