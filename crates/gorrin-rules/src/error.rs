//! Error types for rule-store operations.

use thiserror::Error;

use crate::remote::BackendError;

/// A store operation that was rejected before touching the backend.
///
/// These are handled locally: the operation is a no-op and the UI disables
/// the corresponding control, so no alert beyond the error value is needed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Add or commit with an empty pattern or replacement.
    #[error("rule pattern and replacement must both be non-empty")]
    EmptyField,

    /// Add with a `(pattern, replacement)` pair that already exists.
    #[error("an identical rule already exists")]
    Duplicate,

    /// No rule at the given position.
    #[error("no rule at index {0}")]
    IndexOutOfBounds(usize),

    /// The rule has no backend id (never completed a create round-trip).
    #[error("rule has not been persisted")]
    NotPersisted,
}

/// Errors from rule-store operations.
///
/// Persistence failures are never retried automatically; the in-memory rule
/// set is left in its pre-call state and the error is surfaced to the caller
/// as a warning.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] BackendError),
}

impl StoreError {
    /// True when the operation never reached the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
