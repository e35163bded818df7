//! Typed error enum for the service layer.
//!
//! Callers map variants to their own surface: validation → 400, not found →
//! 404, everything else is a backend failure.

use exam_results_core::ValidationError;
use exam_results_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, validation and I/O failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, pool, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input. Displays the bare validation message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record for the given key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading batch input failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
