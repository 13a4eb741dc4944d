//! Run command implementation for lispnb CLI.
//!
//! Evaluates every code cell of a source file in order through an external
//! evaluator command and prints each result as it completes.

use std::pin::pin;
use std::time::Instant;

use futures::StreamExt;
use lispnb_core::{Cell, Evaluator, ExecutionPipeline, NotebookFormat, Passthrough, PrettyPrinter};
use lispnb_sync::{BracketLocator, NotebookSerializer, load_file};

use crate::colors;
use crate::output::{print_record, record_json};
use crate::process::CommandProcess;

/// Options for the run command.
pub struct RunOptions {
    pub evaluator: String,
    pub pretty: Option<String>,
    pub context: Option<String>,
    pub json: bool,
}

/// Counts reported after a run.
struct RunSummary {
    executed: usize,
    failed: usize,
}

/// Execute a notebook.
pub async fn execute(
    source_path: &str,
    options: RunOptions,
    format: NotebookFormat,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let serializer = NotebookSerializer::new(BracketLocator, format.clone())?;
    let cells = load_file(&serializer, source_path)?.into_cells();
    let evaluator = CommandProcess::from_command_line(&options.evaluator)?;

    if !options.json {
        println!(
            "\n{}Running{} {} ({} code cells)",
            colors::BOLD,
            colors::RESET,
            source_path,
            cells.iter().filter(|c| c.is_executable()).count()
        );
        println!("{}", "─".repeat(50));
    }

    let summary = match options.pretty.as_deref() {
        Some(command) => {
            let printer = CommandProcess::from_command_line(command)?;
            let pipeline = build_pipeline(evaluator, printer, format, options.context);
            run_cells(&pipeline, &cells, options.json).await?
        }
        None => {
            let pipeline = build_pipeline(evaluator, Passthrough, format, options.context);
            run_cells(&pipeline, &cells, options.json).await?
        }
    };

    if !options.json {
        let status = if summary.failed == 0 {
            colors::GREEN
        } else {
            colors::YELLOW
        };
        println!("\n{}", "─".repeat(50));
        println!(
            "{}Completed{} {} cells ({} failed) in {:.2}s",
            status,
            colors::RESET,
            summary.executed,
            summary.failed,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn build_pipeline<P: PrettyPrinter>(
    evaluator: CommandProcess,
    printer: P,
    format: NotebookFormat,
    context: Option<String>,
) -> ExecutionPipeline<CommandProcess, P> {
    let pipeline = ExecutionPipeline::new(evaluator, printer, format);
    match context {
        Some(context) => pipeline.with_context(context),
        None => pipeline,
    }
}

/// Stream records from the pipeline and print them in order.
async fn run_cells<E: Evaluator, P: PrettyPrinter>(
    pipeline: &ExecutionPipeline<E, P>,
    cells: &[Cell],
    json: bool,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary {
        executed: 0,
        failed: 0,
    };

    let mut records = pin!(pipeline.run(cells));
    while let Some(record) = records.next().await {
        summary.executed += 1;
        if !record.is_success() {
            summary.failed += 1;
        }

        if json {
            println!("{}", record_json(&record)?);
        } else {
            print_record(&record, &cells[record.cell_index].content);
        }
    }

    Ok(summary)
}
