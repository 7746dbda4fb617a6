//! Error types for Auditrail

use thiserror::Error;

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Main error type for Auditrail
///
/// Building an entry never produces one of these. They only come out of
/// the store boundary and the bootstrap code.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Store operation failed: {operation} - {message}")]
    Store { operation: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pagination cursor: {0}")]
    InvalidCursor(String),
}

impl AuditError {
    /// Create a store error for the named operation
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error originated in the append-only store
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Io(_))
    }
}
