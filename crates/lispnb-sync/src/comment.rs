//! Comment-block codec.
//!
//! A comment block is a separator region that opens with a blank line
//! followed by a marker-prefixed line, e.g. `"\n\n;; hello\n;; world\n\n"`.
//! [`decode`] turns it into prose content plus the blank-line counts needed
//! to rebuild it; [`encode`] is the inverse.
//!
//! Round-tripping is exact when every line of the block carries the full
//! line prefix (marker and one space). Lines that don't (a bare `;;`, a
//! different indent) keep their marker text in the decoded content and are
//! re-encoded with an extra prefix.

use lispnb_core::{CommentMeta, NotebookFormat};

/// Whether `region` opens a comment block under `format`.
pub fn is_comment_block(region: &str, format: &NotebookFormat) -> bool {
    region.starts_with(&format.block_opener())
}

/// Decode a comment block into prose content and its reconstruction data.
///
/// Returns `None` if `region` does not start with the block opener.
///
/// - `leading_blank_lines` is the offset of the first line prefix.
/// - `trailing_blank_lines` counts the newlines in the trailing whitespace.
/// - The content starts at the first line prefix, ends before the trailing
///   whitespace, and has every line prefix replaced by a bare newline.
pub fn decode(region: &str, format: &NotebookFormat) -> Option<(String, CommentMeta)> {
    if !is_comment_block(region, format) {
        return None;
    }

    let prefix = format.line_prefix();
    let leading = region.find(&prefix)?;
    let body_end = region.trim_end().len().max(leading);
    let trailing = region[body_end..].matches('\n').count();

    let content = region[leading..body_end].replace(&prefix, "\n");
    Some((content, CommentMeta::comment_block(leading, trailing)))
}

/// Encode prose content back into comment-block source text.
pub fn encode(content: &str, meta: &CommentMeta, format: &NotebookFormat) -> String {
    let mut out = "\n".repeat(meta.leading_blank_lines);
    out.push_str(&content.replace('\n', &format.line_prefix()));
    out.push_str(&"\n".repeat(meta.trailing_blank_lines));
    out
}
