//! Join command implementation for lispnb CLI.
//!
//! Rebuilds source text from notebook JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;
use lispnb_core::{Document, NotebookFormat};
use lispnb_sync::{BracketLocator, NotebookData, NotebookSerializer};

use crate::output::write_text;

/// Execute the join command.
pub fn execute(notebook_path: &str, output: Option<&str>, format: NotebookFormat) -> anyhow::Result<()> {
    let path = Path::new(notebook_path);
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read notebook {}", notebook_path))?;

    let document = Document::from(NotebookData::from_json(&json)?);
    let serializer = NotebookSerializer::new(BracketLocator, format)?;

    write_text(output, &serializer.serialize_str(&document))
}
