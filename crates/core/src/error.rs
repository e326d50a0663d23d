//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures. The transport
/// layer maps each variant to exactly one response class; infrastructure
/// failures (e.g. an unwritable event log) belong to their own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The actor's identity could not be resolved or verified.
    #[error("unauthorized")]
    Unauthorized,

    /// The resolved actor lacks the role, ownership, or consent for the action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A referenced entity id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A value failed validation (e.g. malformed input, out-of-range period).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
