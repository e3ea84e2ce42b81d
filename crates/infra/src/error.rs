//! Record operation errors.

use catalog_core::ValidationError;
use thiserror::Error;

/// Result type returned by record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Failure of a record operation.
///
/// Validation failures are detected locally, before the store is touched.
/// Store failures (constraint violations, connectivity, decode errors) are the
/// driver's own `sqlx::Error`, passed through untranslated.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl RecordError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RecordError::Validation(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, RecordError::Store(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            RecordError::Validation(err) => Some(err),
            RecordError::Store(_) => None,
        }
    }
}
