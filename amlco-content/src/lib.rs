//! Plain text <-> HTML conversion for AMLCO report content
//!
//!     Reports are stored by the backend as HTML, but edited by people as plain text. This crate
//!     owns both directions of that conversion, plus the small amount of structure that sits in
//!     between (a flat sequence of headings and paragraphs).
//!
//! Architecture
//!
//!     Every conversion goes through the block model in ./document.rs:
//!
//!         text  --(rules.rs)-->  Document  --(formats/html/serializer.rs)-->  html
//!         html  --(formats/html/parser.rs)-->  Document  --(formats/text)-->  text
//!
//!     The text side classifies each line with an ordered rule table (./rules.rs). The order of
//!     that table is observable behavior: the first rule that accepts a line decides its block.
//!
//!     The html side never tries to recover structure. Parsing keeps the visible text only, one
//!     line per block-level element, so going text -> html -> text keeps the words but drops the
//!     heading markers and the blank lines.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── document.rs             # Block model
//!     ├── rules.rs                # Line classification table
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── text                # Plain text (parse via rules, serialize as lines)
//!     │   └── html
//!     │       ├── parser.rs       # Visible text extraction
//!     │       ├── serializer.rs   # Block markup
//!     │       └── mod.rs
//!     └── lib.rs
//!
//! Known limitations
//!
//!     Text content is written into the markup as-is. A line containing `<` or `&` is not
//!     escaped unless [`HtmlOptions::escape_text`] is set, which mirrors what the backend has
//!     always received from the editor.
//!
//!     The all-caps and numeric outline heuristics will happily promote short acronym lines or
//!     lines starting with a version number to headings. There is no escape syntax.
//!
//!     This is a pure lib: no printing, no env vars, no filesystem access.

pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod rules;

pub use document::{Block, Document, HeadingLevel};
pub use error::FormatError;
pub use format::Format;
pub use formats::html::HtmlOptions;
pub use registry::FormatRegistry;

/// Converts editor text into report markup.
///
/// Never fails: any string is valid input. An empty buffer yields `<div></div>`.
pub fn text_to_html(text: &str) -> String {
    text_to_html_with_options(text, &HtmlOptions::default())
}

/// Same as [`text_to_html`], with explicit serializer options.
pub fn text_to_html_with_options(text: &str, options: &HtmlOptions) -> String {
    let doc = formats::text::parse_text(text);
    formats::html::serializer::render_document(&doc, options)
}

/// Extracts the visible text of report markup, one line per block, trimmed.
///
/// Heading levels are not reintroduced. Empty input yields an empty string.
pub fn html_to_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let doc = formats::html::parser::parse_html(html);
    formats::text::render_text(&doc).trim().to_string()
}
