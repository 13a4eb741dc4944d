//! Notebook format configuration.
//!
//! A [`NotebookFormat`] names the line-comment marker used for prose blocks
//! and the language tags attached to each kind of cell. The defaults match
//! Clojure sources rendered with Markdown prose.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Comment marker and language tags for a notebook source format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookFormat {
    /// Line-comment marker that introduces prose lines (e.g. `;;`).
    pub comment_marker: String,

    /// Language tag for executable cells.
    pub code_language: String,

    /// Language tag for prose cells.
    pub markup_language: String,
}

impl NotebookFormat {
    /// Create a format with the given marker and code language, Markdown prose.
    pub fn new(comment_marker: impl Into<String>, code_language: impl Into<String>) -> Self {
        Self {
            comment_marker: comment_marker.into(),
            code_language: code_language.into(),
            ..Self::default()
        }
    }

    /// Check that the marker can be used to encode prose lines.
    pub fn validate(&self) -> Result<()> {
        if self.comment_marker.trim().is_empty() {
            return Err(Error::InvalidFormat(format!(
                "comment marker {:?} is empty or whitespace",
                self.comment_marker
            )));
        }
        if self.comment_marker.contains('\n') {
            return Err(Error::InvalidFormat(format!(
                "comment marker {:?} contains a newline",
                self.comment_marker
            )));
        }
        Ok(())
    }

    /// Prefix that starts every encoded prose line: newline, marker, space.
    pub fn line_prefix(&self) -> String {
        format!("\n{} ", self.comment_marker)
    }

    /// Text a separator region must start with to be read as a comment block.
    pub fn block_opener(&self) -> String {
        format!("\n\n{} ", self.comment_marker)
    }
}

impl Default for NotebookFormat {
    fn default() -> Self {
        Self {
            comment_marker: ";;".to_string(),
            code_language: "clojure".to_string(),
            markup_language: "markdown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefixes() {
        let format = NotebookFormat::default();
        assert_eq!(format.line_prefix(), "\n;; ");
        assert_eq!(format.block_opener(), "\n\n;; ");
        assert!(format.validate().is_ok());
    }

    #[test]
    fn test_custom_marker() {
        let format = NotebookFormat::new("#", "python");
        assert_eq!(format.line_prefix(), "\n# ");
        assert_eq!(format.markup_language, "markdown");
    }

    #[test]
    fn test_rejects_unusable_markers() {
        assert!(NotebookFormat::new("", "clojure").validate().is_err());
        assert!(NotebookFormat::new(";\n;", "clojure").validate().is_err());
    }

    #[test]
    fn test_rejects_whitespace_markers() {
        assert!(NotebookFormat::new("\t", "clojure").validate().is_err());
        assert!(NotebookFormat::new("  ", "clojure").validate().is_err());
        assert!(NotebookFormat::new(" ; ", "clojure").validate().is_ok());
    }
}
