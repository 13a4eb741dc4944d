//! Load/save adapter between file bytes, documents and the host wire shape.

use serde::{Deserialize, Serialize};

use lispnb_core::{Cell, CellKind, CommentMeta, Document, NotebookFormat};

use crate::error::SyncResult;
use crate::join::join;
use crate::locator::FormLocator;
use crate::split::split;

/// Converts source bytes to documents and back.
pub struct NotebookSerializer<L> {
    /// Boundary locator for top-level forms
    locator: L,
    /// Comment marker and language tags
    format: NotebookFormat,
}

impl<L: FormLocator> NotebookSerializer<L> {
    /// Create a serializer, rejecting formats whose marker can't encode prose.
    pub fn new(locator: L, format: NotebookFormat) -> SyncResult<Self> {
        format.validate()?;
        Ok(Self { locator, format })
    }

    /// The notebook format in use.
    pub fn format(&self) -> &NotebookFormat {
        &self.format
    }

    /// Decode UTF-8 source bytes into a document.
    pub fn deserialize(&self, bytes: &[u8]) -> SyncResult<Document> {
        let text = String::from_utf8(bytes.to_vec())?;
        self.deserialize_str(&text)
    }

    /// Split source text into a document.
    pub fn deserialize_str(&self, text: &str) -> SyncResult<Document> {
        let spans = self.locator.locate(text);
        lispnb_core::span::validate_spans(text, &spans)?;

        let document = split(text, &spans, &self.format);
        tracing::debug!(
            "Split {} bytes into {} cells ({} forms)",
            text.len(),
            document.len(),
            spans.len()
        );
        Ok(document)
    }

    /// Encode a document as UTF-8 source bytes.
    pub fn serialize(&self, document: &Document) -> Vec<u8> {
        self.serialize_str(document).into_bytes()
    }

    /// Join a document into source text.
    pub fn serialize_str(&self, document: &Document) -> String {
        join(document, &self.format)
    }
}

/// Cell kind as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    Code,
    Markup,
}

/// Prose reconstruction data as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMetadata {
    pub as_markdown: bool,
    pub starting_whitespace: usize,
    pub ending_whitespace: usize,
}

/// A cell in the host document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCell {
    pub kind: WireKind,
    pub value: String,
    pub language_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WireMetadata>,
}

/// The host's notebook payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookData {
    pub cells: Vec<WireCell>,
}

impl NotebookData {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> SyncResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Cell> for WireCell {
    fn from(cell: &Cell) -> Self {
        Self {
            kind: match cell.kind {
                CellKind::Executable => WireKind::Code,
                CellKind::Prose => WireKind::Markup,
            },
            value: cell.content.clone(),
            language_id: cell.language.clone(),
            metadata: cell.meta.map(|m| WireMetadata {
                as_markdown: m.comment_derived,
                starting_whitespace: m.leading_blank_lines,
                ending_whitespace: m.trailing_blank_lines,
            }),
        }
    }
}

impl From<WireCell> for Cell {
    fn from(wire: WireCell) -> Self {
        Self {
            kind: match wire.kind {
                WireKind::Code => CellKind::Executable,
                WireKind::Markup => CellKind::Prose,
            },
            content: wire.value,
            language: wire.language_id,
            meta: wire.metadata.map(|m| CommentMeta {
                comment_derived: m.as_markdown,
                leading_blank_lines: m.starting_whitespace,
                trailing_blank_lines: m.ending_whitespace,
            }),
        }
    }
}

impl From<&Document> for NotebookData {
    fn from(document: &Document) -> Self {
        Self {
            cells: document.cells().iter().map(WireCell::from).collect(),
        }
    }
}

impl From<NotebookData> for Document {
    fn from(data: NotebookData) -> Self {
        data.cells.into_iter().map(Cell::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::BracketLocator;

    fn serializer() -> NotebookSerializer<BracketLocator> {
        NotebookSerializer::new(BracketLocator, NotebookFormat::default()).unwrap()
    }

    #[test]
    fn test_bytes_round_trip() {
        let source = "(ns demo)\n\n;; # Demo\n;; Some prose.\n\n(+ 1 2)\n";
        let serializer = serializer();
        let doc = serializer.deserialize(source.as_bytes()).unwrap();

        assert_eq!(doc.executable_cells().count(), 2);
        assert_eq!(serializer.serialize(&doc), source.as_bytes());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = serializer().deserialize(&[b'(', 0xff, b')']).unwrap_err();
        assert!(matches!(err, crate::SyncError::Encoding(_)));
    }

    #[test]
    fn test_bad_locator_output_is_rejected() {
        let serializer =
            NotebookSerializer::new(|_: &str| vec![2..4, 0..1], NotebookFormat::default())
                .unwrap();
        let err = serializer.deserialize_str("(a) (b)").unwrap_err();
        assert!(matches!(
            err,
            crate::SyncError::Core(lispnb_core::Error::InvalidSpan(_))
        ));
    }

    #[test]
    fn test_unusable_format_is_rejected() {
        let result = NotebookSerializer::new(BracketLocator, NotebookFormat::new("", "clojure"));
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_shape() {
        let format = NotebookFormat::default();
        let cell = Cell::comment_prose("\nhi", CommentMeta::comment_block(1, 2), &format);
        let json = serde_json::to_value(WireCell::from(&cell)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "kind": "markup",
                "value": "\nhi",
                "languageId": "markdown",
                "metadata": {
                    "asMarkdown": true,
                    "startingWhitespace": 1,
                    "endingWhitespace": 2
                }
            })
        );

        let code = serde_json::to_value(WireCell::from(&Cell::executable("(a)", &format))).unwrap();
        assert!(code.get("metadata").is_none());
        assert_eq!(code["kind"], "code");
    }

    #[test]
    fn test_notebook_data_round_trip() {
        let serializer = serializer();
        let doc = serializer
            .deserialize_str("(a)\n\n;; note\n\n(b)")
            .unwrap();

        let json = NotebookData::from(&doc).to_json().unwrap();
        let back = Document::from(NotebookData::from_json(&json).unwrap());

        assert_eq!(back, doc);
    }
}
