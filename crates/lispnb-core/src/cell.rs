//! Cell and document model.
//!
//! A [`Document`] is the cell-structured view of a source file: executable
//! cells hold top-level forms verbatim, prose cells hold the text between
//! them. Prose that came out of a line-comment block carries a
//! [`CommentMeta`] so it can be re-encoded byte for byte.

use serde::{Deserialize, Serialize};

use crate::format::NotebookFormat;

/// Kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Top-level form, evaluated by the pipeline.
    Executable,
    /// Text between forms.
    Prose,
}

/// Reconstruction data for prose extracted from a comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentMeta {
    /// Whether the content must be re-prefixed with the comment marker on save.
    pub comment_derived: bool,

    /// Newlines emitted before the first encoded line.
    pub leading_blank_lines: usize,

    /// Newlines emitted after the last encoded line.
    pub trailing_blank_lines: usize,
}

impl CommentMeta {
    /// Metadata for a comment-derived block.
    pub fn comment_block(leading_blank_lines: usize, trailing_blank_lines: usize) -> Self {
        Self {
            comment_derived: true,
            leading_blank_lines,
            trailing_blank_lines,
        }
    }
}

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell kind
    pub kind: CellKind,

    /// Logical (de-escaped) text of the cell
    pub content: String,

    /// Language tag, fixed per kind by the notebook format
    pub language: String,

    /// Comment-block reconstruction data (prose only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<CommentMeta>,
}

impl Cell {
    /// Create an executable cell.
    pub fn executable(content: impl Into<String>, format: &NotebookFormat) -> Self {
        Self {
            kind: CellKind::Executable,
            content: content.into(),
            language: format.code_language.clone(),
            meta: None,
        }
    }

    /// Create a verbatim prose cell.
    pub fn prose(content: impl Into<String>, format: &NotebookFormat) -> Self {
        Self {
            kind: CellKind::Prose,
            content: content.into(),
            language: format.markup_language.clone(),
            meta: None,
        }
    }

    /// Create a prose cell decoded from a comment block.
    pub fn comment_prose(
        content: impl Into<String>,
        meta: CommentMeta,
        format: &NotebookFormat,
    ) -> Self {
        Self {
            meta: Some(meta),
            ..Self::prose(content, format)
        }
    }

    /// Whether this cell is evaluated by the pipeline.
    pub fn is_executable(&self) -> bool {
        self.kind == CellKind::Executable
    }

    /// Comment-block metadata, if this prose must be re-encoded on save.
    pub fn comment_meta(&self) -> Option<&CommentMeta> {
        self.meta.as_ref().filter(|m| m.comment_derived)
    }
}

/// Ordered sequence of cells in source order.
///
/// Empty cells are never retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    cells: Vec<Cell>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, dropping it if its content is empty.
    pub fn push(&mut self, cell: Cell) {
        if !cell.content.is_empty() {
            self.cells.push(cell);
        }
    }

    /// All cells in order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Executable cells in order.
    pub fn executable_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_executable())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the document has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consume the document, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

impl FromIterator<Cell> for Document {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut doc = Document::new();
        for cell in iter {
            doc.push(cell);
        }
        doc
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
