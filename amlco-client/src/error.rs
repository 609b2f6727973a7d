//! Error types for backend calls and local state

use std::fmt;

/// Errors surfaced by backend operations.
///
/// `Display` yields the message meant for the person who triggered the action.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    Transport(String),
    /// The client could not be set up from its settings; nothing was sent
    InvalidConfig(String),
    /// The backend answered with a non-2xx status
    Status { status: u16, message: String },
    /// A 2xx response whose body did not have the expected shape
    Decode(String),
    /// A 2xx response that lacks a value the workflow needs to continue
    Incomplete(String),
    /// A required earlier step was skipped (e.g. generating without an uploaded spreadsheet)
    Precondition(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    ///
    /// The message is the JSON `detail` field when present, otherwise the raw body text,
    /// otherwise `fallback`.
    pub fn from_response(status: u16, body: &[u8], fallback: &str) -> Self {
        ApiError::Status {
            status,
            message: error_detail(body).unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        ApiError::Precondition(message.into())
    }

    /// Same kind of failure, shown with a different message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            ApiError::Transport(_) => ApiError::Transport(message),
            ApiError::InvalidConfig(_) => ApiError::InvalidConfig(message),
            ApiError::Status { status, .. } => ApiError::Status { status, message },
            ApiError::Decode(_) => ApiError::Decode(message),
            ApiError::Incomplete(_) => ApiError::Incomplete(message),
            ApiError::Precondition(_) => ApiError::Precondition(message),
        }
    }

    /// HTTP status for backend rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn error_detail(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(text) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => {
                return Some(detail.clone())
            }
            // Validation errors arrive as structured detail; show them verbatim
            Some(detail @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
                return Some(detail.to_string())
            }
            _ => {}
        }
    }

    Some(text.to_string())
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "{msg}"),
            ApiError::InvalidConfig(msg) => write!(f, "{msg}"),
            ApiError::Status { message, .. } => write!(f, "{message}"),
            ApiError::Decode(msg) => write!(f, "Unexpected response from server: {msg}"),
            ApiError::Incomplete(msg) => write!(f, "{msg}"),
            ApiError::Precondition(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors reading or writing the local state file
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Io(String),
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "State file error: {msg}"),
            StoreError::Corrupt(msg) => write!(f, "State file is not valid JSON: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
