//! Document splitter.
//!
//! Cuts source text into an alternating sequence of separator and form
//! regions using the spans reported by a boundary locator, then classifies
//! each region into a cell.

use std::ops::Range;

use lispnb_core::{Cell, Document, NotebookFormat};

use crate::comment;

/// A slice of the source between two consecutive boundary offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region<'a> {
    /// Text around or between forms.
    Separator(&'a str),
    /// A top-level form.
    Form(&'a str),
}

/// Cut `text` into alternating regions.
///
/// The boundary list is `0`, every span start and end, then `text.len()`.
/// Consecutive boundaries delimit regions; even positions are separators
/// and odd positions are forms, so the result always starts and ends with a
/// separator and has `2 * spans.len() + 1` entries.
///
/// # Panics
///
/// Panics if the spans are out of bounds, reversed, overlapping or not on
/// char boundaries. See [`lispnb_core::span::validate_spans`].
pub fn regions<'a>(text: &'a str, spans: &[Range<usize>]) -> Vec<Region<'a>> {
    debug_assert!(
        lispnb_core::span::validate_spans(text, spans).is_ok(),
        "form spans violate the span contract"
    );

    let mut boundaries = Vec::with_capacity(spans.len() * 2 + 2);
    boundaries.push(0);
    for span in spans {
        boundaries.push(span.start);
        boundaries.push(span.end);
    }
    boundaries.push(text.len());

    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let slice = &text[pair[0]..pair[1]];
            if i % 2 == 0 {
                Region::Separator(slice)
            } else {
                Region::Form(slice)
            }
        })
        .collect()
}

/// Classify one region into a cell.
///
/// Forms become executable cells verbatim. Separators that open a comment
/// block become comment-derived prose; any other separator becomes verbatim
/// prose (possibly empty).
pub fn classify(region: Region<'_>, format: &NotebookFormat) -> Cell {
    match region {
        Region::Form(text) => Cell::executable(text, format),
        Region::Separator(text) => match comment::decode(text, format) {
            Some((content, meta)) => Cell::comment_prose(content, meta, format),
            None => Cell::prose(text, format),
        },
    }
}

/// Split source text into a document.
pub fn split(text: &str, spans: &[Range<usize>], format: &NotebookFormat) -> Document {
    regions(text, spans)
        .into_iter()
        .map(|region| classify(region, format))
        .collect()
}
