use delve_domain::{DomainError, ResourceKind};

/// Failure to decode (or, rarely, encode) a persisted record.
///
/// Decode errors are fatal to the read that raised them. Codecs never
/// substitute a default value or resynchronise after one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Input ended before the record did.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A discriminant named no known variant.
    #[error("Unknown {kind} tag: {tag}")]
    UnknownTag { kind: &'static str, tag: i16 },

    /// A length prefix was negative where absence is not allowed, or too large.
    #[error("Invalid length {length} for {what}")]
    InvalidLength { what: &'static str, length: i64 },

    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    /// A resource reference could not be resolved by the resource lookup.
    #[error("Unresolved {kind} resource: {id}")]
    UnresolvedResource { kind: ResourceKind, id: String },

    /// Bytes were decoded but do not form a valid record.
    #[error("Invalid record: {0}")]
    Invalid(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

impl CodecError {
    pub fn invalid_length(what: &'static str, length: impl Into<i64>) -> Self {
        Self::InvalidLength {
            what,
            length: length.into(),
        }
    }

    pub fn unresolved(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::UnresolvedResource {
            kind,
            id: id.into(),
        }
    }
}

impl From<DomainError> for CodecError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownKind { kind, tag } => Self::UnknownTag { kind, tag },
            other => Self::Invalid(other.to_string()),
        }
    }
}
