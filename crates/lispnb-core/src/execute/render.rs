//! Output rendering for evaluation results.
//!
//! Every successful evaluation is shown three ways: the raw text, a fenced
//! Markdown block holding the pretty-printed form, and the raw text tagged
//! as structured data. Results that look like an HTML document (once one
//! pair of surrounding quotes is removed) also get an HTML rendering.

use crate::execute::outcome::OutputItem;

/// MIME tags used by the pipeline.
pub mod mime {
    pub const PLAIN: &str = "text/plain";
    pub const MARKDOWN: &str = "text/markdown";
    pub const EDN: &str = "x-application/edn";
    pub const HTML: &str = "text/html";
}

/// Prefix a result must start with to be rendered as HTML.
pub const HTML_MARKER: &str = "<html";

/// Build the outputs for a successful evaluation.
pub fn result_outputs(raw: &str, pretty: &str, code_language: &str) -> Vec<OutputItem> {
    let mut outputs = vec![
        OutputItem::new(mime::PLAIN, raw),
        OutputItem::new(mime::MARKDOWN, fenced(pretty, code_language)),
        OutputItem::new(mime::EDN, raw),
    ];

    if let Some(html) = html_payload(raw) {
        outputs.push(OutputItem::new(mime::HTML, html));
    }

    outputs
}

/// Wrap `text` in a Markdown code fence tagged with `language`.
pub fn fenced(text: &str, language: &str) -> String {
    format!("```{}\n{}\n```", language, text)
}

/// Return the HTML body of a result, if it is one.
///
/// Strips at most one leading and one trailing `"` before checking for
/// [`HTML_MARKER`]. Escapes inside the string are left alone.
pub fn html_payload(raw: &str) -> Option<&str> {
    let unquoted = raw.strip_prefix('"').unwrap_or(raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.starts_with(HTML_MARKER).then_some(unquoted)
}
