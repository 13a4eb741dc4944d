//! Check command implementation for lispnb CLI.
//!
//! Verifies that a source file is reproduced exactly by split and join.

use std::fs;

use anyhow::Context;
use lispnb_core::NotebookFormat;
use lispnb_sync::{BracketLocator, NotebookSerializer};

use crate::colors;

/// Execute the check command.
pub fn execute(source_path: &str, format: NotebookFormat) -> anyhow::Result<()> {
    let source = fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read {}", source_path))?;

    let serializer = NotebookSerializer::new(BracketLocator, format)?;
    let document = serializer.deserialize_str(&source)?;
    let rebuilt = serializer.serialize_str(&document);

    if let Some(offset) = first_difference(&source, &rebuilt) {
        let line = source[..floor_char_boundary(&source, offset)]
            .matches('\n')
            .count()
            + 1;
        anyhow::bail!(
            "Round-trip differs from {} at byte {} (line {}); \
             comment blocks need every line prefixed with `{} `",
            source_path,
            offset,
            line,
            serializer.format().comment_marker
        );
    }

    println!(
        "{}✓{} {} round-trips ({} cells, {} code)",
        colors::GREEN,
        colors::RESET,
        source_path,
        document.len(),
        document.executable_cells().count()
    );
    Ok(())
}

/// Byte offset of the first difference between `a` and `b`, if any.
fn first_difference(a: &str, b: &str) -> Option<usize> {
    let common = a
        .bytes()
        .zip(b.bytes())
        .position(|(x, y)| x != y)
        .unwrap_or(a.len().min(b.len()));

    (common < a.len() || common < b.len()).then_some(common)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("ab", "abc"), Some(2));
        assert_eq!(first_difference("", ""), None);
    }

    #[test]
    fn test_floor_char_boundary() {
        assert_eq!(floor_char_boundary("aλ", 2), 1);
        assert_eq!(floor_char_boundary("aλ", 9), 3);
    }
}
