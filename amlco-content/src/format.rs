//! Format trait definition
//!
//! This module defines the Format trait that all format implementations implement.
//! The trait provides a uniform interface for parsing and serializing documents.

use crate::document::Document;
use crate::error::FormatError;
use std::collections::HashMap;

/// Trait for report content formats
///
/// Implementors provide conversion between a string representation and the block [`Document`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(format!("{} blocks", doc.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "text", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::Unsupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::Unsupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which delegates to
    /// [`Format::serialize`] and rejects any parameter it is given.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::Unsupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
