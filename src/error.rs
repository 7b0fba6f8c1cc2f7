//! Error types for mesh buffer conversion.

use thiserror::Error;

/// Result type alias using MeshBufferError.
pub type Result<T> = std::result::Result<T, MeshBufferError>;

/// Main error type for import and export operations.
#[derive(Error, Debug)]
pub enum MeshBufferError {
    /// The document is structurally valid JSON but not a valid mesh buffer.
    #[error("Invalid mesh buffer: {0}")]
    InvalidFormat(String),

    /// The export target is missing or is not a mesh.
    #[error("Invalid export target: {0}")]
    InvalidTarget(String),

    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to format text output.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl MeshBufferError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        MeshBufferError::InvalidFormat(message.into())
    }

    /// Check if this error was caused by a malformed document.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, MeshBufferError::InvalidFormat(_) | MeshBufferError::Json(_))
    }
}
