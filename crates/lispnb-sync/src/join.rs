//! Document joiner.
//!
//! Rebuilds source text from cells; the inverse of [`crate::split`].

use lispnb_core::{Cell, Document, NotebookFormat};

use crate::comment;

/// Source text for a single cell.
pub fn cell_source(cell: &Cell, format: &NotebookFormat) -> String {
    match cell.comment_meta() {
        Some(meta) => comment::encode(&cell.content, meta, format),
        None => cell.content.clone(),
    }
}

/// Join a document back into source text.
pub fn join(document: &Document, format: &NotebookFormat) -> String {
    document
        .cells()
        .iter()
        .map(|cell| cell_source(cell, format))
        .collect()
}
