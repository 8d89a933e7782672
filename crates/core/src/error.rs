//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is raised before any state is touched, so a failed operation
/// leaves the warehouse exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value was out of range, missing, conflicting or not date-only.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A box does not fit the footprint of its target pallet.
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    /// An entity with the same identifier already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The addressed entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    pub fn duplicate_key(msg: impl Into<String>) -> Self {
        Self::DuplicateKey(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
