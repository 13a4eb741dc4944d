//! Split command implementation for lispnb CLI.
//!
//! Converts a source file into the notebook JSON a host editor loads.

use std::path::Path;

use lispnb_core::NotebookFormat;
use lispnb_sync::{BracketLocator, NotebookData, NotebookSerializer, load_file};

use crate::output::write_text;

/// Execute the split command.
pub fn execute(source_path: &str, output: Option<&str>, format: NotebookFormat) -> anyhow::Result<()> {
    let path = Path::new(source_path);
    if !path.exists() {
        anyhow::bail!("Source file not found: {}", source_path);
    }

    let serializer = NotebookSerializer::new(BracketLocator, format)?;
    let document = load_file(&serializer, path)?;

    let mut json = NotebookData::from(&document).to_json()?;
    json.push('\n');
    write_text(output, &json)
}
