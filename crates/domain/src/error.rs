//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while parsing wire values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The listing status string is not one of the known variants.
    #[error("unknown listing status: {0}")]
    UnknownStatus(String),

    /// The sold location string is not one of the known variants.
    #[error("unknown sold location: {0}")]
    UnknownSoldLocation(String),

    /// The promotion tier string is not one of the known variants.
    #[error("unknown promotion tier: {0}")]
    UnknownPromotionTier(String),

    /// The status filter string is not one of the known variants.
    #[error("unknown status filter: {0}")]
    UnknownStatusFilter(String),

    /// The sort key string is not one of the known variants.
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    /// The sort order string is not one of the known variants.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
