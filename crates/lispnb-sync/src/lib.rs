//! Sync engine for lispnb notebooks.
//!
//! Converts between flat source files and cell-structured documents.
//!
//! # Architecture
//!
//! ```text
//! notebook.clj ──► FormLocator ──► spans ──► split ──► Document ──► NotebookData (host)
//!       ▲                                                  │
//!       └──────────────────────── join ◄───────────────────┘
//! ```
//!
//! Prose between forms that is written as a `;;` comment block is decoded
//! into Markdown cells and re-encoded on save; any other text between forms
//! is kept verbatim.

pub mod comment;
mod error;
mod join;
mod locator;
mod serializer;
mod split;

pub use error::{SyncError, SyncResult};
pub use join::{cell_source, join};
pub use locator::{BracketLocator, FormLocator};
pub use serializer::{NotebookData, NotebookSerializer, WireCell, WireKind, WireMetadata};
pub use split::{Region, classify, regions, split};

use std::fs;
use std::path::Path;

use lispnb_core::Document;

/// Load a source file as a document.
pub fn load_file<L: FormLocator>(
    serializer: &NotebookSerializer<L>,
    path: impl AsRef<Path>,
) -> SyncResult<Document> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| SyncError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let document = serializer.deserialize(&bytes)?;
    tracing::info!("Loaded {} ({} cells)", path.display(), document.len());
    Ok(document)
}

/// Save a document as a source file.
pub fn save_file<L: FormLocator>(
    serializer: &NotebookSerializer<L>,
    document: &Document,
    path: impl AsRef<Path>,
) -> SyncResult<()> {
    let path = path.as_ref();
    fs::write(path, serializer.serialize(document)).map_err(|e| SyncError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!("Saved {} ({} cells)", path.display(), document.len());
    Ok(())
}
