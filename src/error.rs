//! Error types
//!
//! Pure pagination never fails. Errors only come from the host document
//! (a tree operation was rejected), from configuration parsing, and from the
//! print entry point's precondition check.

use thiserror::Error;

/// A host document operation failed
#[derive(Debug, Clone, Error, PartialEq)]
#[error("document operation `{op}` failed: {message}")]
pub struct DomError {
    pub op: &'static str,
    pub message: String,
}

impl DomError {
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

/// Layout configuration could not be decoded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid layout configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of the high-level print/export entry point
#[derive(Debug, Error)]
pub enum PrintError {
    /// No editor root was supplied
    #[error("cannot print: editor root element not found")]
    RootMissing,
    /// The editor root exists but is not attached to the live document
    #[error("cannot print: editor root is detached from the document")]
    RootDetached,
    #[error("cannot prepare print layout: {0}")]
    Dom(#[from] DomError),
    /// The platform print action itself failed
    #[error("print action failed: {0}")]
    PrintFailed(String),
}
