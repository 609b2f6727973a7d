//! Conversion errors
//!
//! Reading plain text or report markup never fails: unknown tags are skipped and every text line
//! maps to a block. Errors come from the registry lookup and from serializer options.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No format registered under this name or extension
    UnknownFormat(String),
    /// The format lacks the requested direction or option
    Unsupported(String),
    /// A serializer option was given a value it cannot use
    InvalidOption { key: String, value: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(f, "Unknown format '{name}'"),
            FormatError::Unsupported(msg) => write!(f, "{msg}"),
            FormatError::InvalidOption { key, value } => {
                write!(f, "Invalid value '{value}' for option '{key}'")
            }
        }
    }
}

impl std::error::Error for FormatError {}
