//! Form span contract.
//!
//! A boundary locator reports top-level forms as byte ranges into the
//! source. The splitter relies on these ranges being in bounds, on char
//! boundaries, never reversed, and ordered without overlap.

use std::ops::Range;

use crate::error::{Error, Result};

/// Check that `spans` is a valid form span set for `text`.
pub fn validate_spans(text: &str, spans: &[Range<usize>]) -> Result<()> {
    let mut previous_end = 0;

    for (i, span) in spans.iter().enumerate() {
        if span.start > span.end {
            return Err(Error::InvalidSpan(format!(
                "span #{} is reversed ({}..{})",
                i, span.start, span.end
            )));
        }
        if span.end > text.len() {
            return Err(Error::InvalidSpan(format!(
                "span #{} ends at {} past end of text ({})",
                i,
                span.end,
                text.len()
            )));
        }
        if span.start < previous_end {
            return Err(Error::InvalidSpan(format!(
                "span #{} starts at {} before previous end {}",
                i, span.start, previous_end
            )));
        }
        if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
            return Err(Error::InvalidSpan(format!(
                "span #{} ({}..{}) is not on a char boundary",
                i, span.start, span.end
            )));
        }
        previous_end = span.end;
    }

    Ok(())
}
