//! Output helpers shared by the commands.

use std::fs;
use std::path::Path;

use anyhow::Context;
use lispnb_core::execute::render::mime;
use lispnb_core::{ExecutionRecord, OutputItem};
use serde::Serialize;

use crate::colors;

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_text(output: Option<&str>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(Path::new(path), text)
            .with_context(|| format!("Failed to write {}", path)),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// One execution record as a JSON line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordLine<'a> {
    cell: usize,
    duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<&'a [OutputItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a lispnb_core::ErrorDescriptor>,
}

/// Render a record as a single JSON line.
pub fn record_json(record: &ExecutionRecord) -> anyhow::Result<String> {
    let line = RecordLine {
        cell: record.cell_index,
        duration_ms: record.duration().as_secs_f64() * 1000.0,
        outputs: record.outputs(),
        error: record.error(),
    };
    Ok(serde_json::to_string(&line)?)
}

/// Print a record for a human reader.
///
/// Shows the plain-text rendering and notes any HTML rendering; other
/// representations carry the same text.
pub fn print_record(record: &ExecutionRecord, source: &str) {
    let first_line = source.lines().next().unwrap_or_default();
    let ellipsis = if source.lines().nth(1).is_some() { " …" } else { "" };

    println!(
        "\n{}[{}]{} {}{}{}{}",
        colors::CYAN,
        record.cell_index,
        colors::RESET,
        colors::DIM,
        first_line,
        ellipsis,
        colors::RESET
    );

    match &record.outcome {
        Ok(outputs) => {
            for item in outputs {
                match item.mime.as_str() {
                    mime::PLAIN => {
                        for line in item.payload.lines() {
                            println!("  {}", line);
                        }
                    }
                    mime::HTML => println!(
                        "  {}[html]{} {} bytes",
                        colors::YELLOW,
                        colors::RESET,
                        item.payload.len()
                    ),
                    _ => {}
                }
            }
        }
        Err(error) => {
            println!(
                "  {}{}:{} {}",
                colors::RED,
                error.name,
                colors::RESET,
                error.message
            );
        }
    }
}
