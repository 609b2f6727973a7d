//! HTML format implementation
//!
//! # Element Mapping
//!
//! | Block          | Export                 | Import                                   |
//! |----------------|------------------------|------------------------------------------|
//! | Document       | `<div>` root container | whole `<body>`                           |
//! | Heading (1..3) | `<h1>`..`<h3>`         | text only, becomes a paragraph           |
//! | Paragraph      | `<p>`                  | one paragraph per visual line            |
//!
//! Export writes bare tags with no classes or attributes; the backend renders report content
//! with its own stylesheet and stores the fragment as-is.
//!
//! # Library Choice
//!
//! Import uses `html5ever` + `markup5ever_rcdom`. Backend markup is produced by several
//! generators over time and is not always well formed, so a browser-grade parser is the only
//! reliable way to get at the visible text.
//!
//! Export is plain string building. The fragment is tiny and text is passed through verbatim
//! unless [`HtmlOptions::escape_text`] is set.
//!
//! # Lossy Conversions
//!
//! - heading levels and the heading/paragraph distinction are dropped on import
//! - blank lines are dropped in both directions
//! - whitespace runs collapse to a single space outside `<pre>`

pub mod parser;
pub mod serializer;

use crate::document::Document;
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

/// Options for HTML serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Escape `&`, `<` and `>` in block text. Off by default.
    pub escape_text: bool,
}

impl HtmlOptions {
    pub fn escaped() -> Self {
        Self { escape_text: true }
    }
}

/// Format implementation for report markup
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Report markup fragment (div of headings and paragraphs)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_html(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::render_document(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut resolved = self.options;
        for (key, value) in options {
            match key.as_str() {
                "escape-text" => resolved.escape_text = parse_flag(key, value)?,
                other => {
                    return Err(FormatError::Unsupported(format!(
                        "Format 'html' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(serializer::render_document(doc, &resolved))
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(FormatError::InvalidOption {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
