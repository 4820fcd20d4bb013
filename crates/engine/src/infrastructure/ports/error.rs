//! Error types for port operations.

/// Participant storage errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// File system operation failed - includes operation name for tracing.
    #[error("I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn io(operation: &'static str, error: impl ToString) -> Self {
        Self::Io {
            operation,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
