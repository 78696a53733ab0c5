//! Error type for store operations.

use crate::infrastructure::codec::CodecError;

/// Store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Any call after `close()`.
    #[error("Store is closed")]
    Closed,

    /// The storage backend failed. Includes the operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// Persisted bytes did not decode, or a value could not be encoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// No unused identifier turned up within the attempt budget.
    #[error("No free {space} identifier after {attempts} attempts")]
    IdentifierExhausted { space: &'static str, attempts: usize },

    /// Persisted bookkeeping (versions, counters) is not what this build wrote.
    #[error("Invalid store state: {0}")]
    Invalid(String),
}

impl StoreError {
    /// Create a Backend error with operation context.
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn exhausted(space: &'static str, attempts: usize) -> Self {
        Self::IdentifierExhausted { space, attempts }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::IdentifierExhausted { .. })
    }
}
