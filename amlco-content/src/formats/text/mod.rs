//! Plain text format
//!
//! Parsing runs every line through the classification table in [`crate::rules`]. Serializing
//! writes one line per block with no heading markers, which is what the report editor shows
//! when it switches from preview to edit mode.

use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use crate::rules::classify_line;

/// Format implementation for editor text
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain editor text (markdown-style heading prefixes)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_text(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(render_text(doc))
    }
}

/// Split on `\n` and classify each line; blank lines produce nothing.
pub fn parse_text(text: &str) -> Document {
    Document::with_blocks(text.split('\n').filter_map(classify_line).collect())
}

/// One line per block, joined with `\n`.
pub fn render_text(doc: &Document) -> String {
    doc.blocks
        .iter()
        .map(|block| block.text())
        .collect::<Vec<_>>()
        .join("\n")
}
