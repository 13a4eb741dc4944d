//! Core engine for lispnb notebooks.
//!
//! This crate provides:
//! - The cell/document model shared by the sync layer and the host
//! - Notebook format configuration (comment marker, language tags)
//! - The sequential cell execution pipeline and its output rendering

pub mod cell;
pub mod error;
pub mod execute;
pub mod format;
pub mod span;

pub use cell::{Cell, CellKind, CommentMeta, Document};
pub use error::{Error, Result};
pub use execute::{
    CellOutcome, ErrorDescriptor, EvalFailure, Evaluator, ExecutionCallback, ExecutionPipeline,
    ExecutionRecord, OutputItem, Passthrough, PrettyPrinter,
};
pub use format::NotebookFormat;
