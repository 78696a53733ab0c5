//! Unified error types for the domain layer
//!
//! Constructors on the model types validate their invariants and report
//! violations through [`DomainError`].

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A discriminant did not name any known kind
    #[error("Unknown {kind} tag: {tag}")]
    UnknownKind { kind: &'static str, tag: i16 },
}

impl DomainError {
    /// Creates a validation error for rejected input values.
    ///
    /// # Example
    /// ```ignore
    /// if period == 0 {
    ///     return Err(DomainError::validation("period must be at least one tick"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Create an unknown discriminant error
    pub fn unknown_kind(kind: &'static str, tag: i16) -> Self {
        Self::UnknownKind { kind, tag }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("period must be positive");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: period must be positive");
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("zone belongs to another map");
        assert_eq!(
            err.to_string(),
            "Constraint violation: zone belongs to another map"
        );
    }

    #[test]
    fn test_unknown_kind_error() {
        let err = DomainError::unknown_kind("entity", 99);
        assert_eq!(err.to_string(), "Unknown entity tag: 99");
    }
}
