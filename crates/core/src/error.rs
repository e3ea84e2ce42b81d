//! Validation error model.

use thiserror::Error;

/// Local validation failure.
///
/// Raised for malformed input at the serialization boundary, or when an
/// operation is attempted on a record missing its identifier. Storage
/// failures are reported separately by the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was not a key/value object.
    #[error("invalid record: body contained bad or no data")]
    NotAnObject,

    /// A required key was absent.
    #[error("invalid record: missing {0}")]
    MissingField(&'static str),

    /// A key was present but held a value of the wrong type.
    #[error("invalid type for {expected} [{field}]: {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A category name that is not part of the enumeration.
    #[error("invalid attribute: category {0:?}")]
    InvalidCategory(String),

    /// A price that cannot be represented as an exact fixed-point decimal.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// An operation that needs a stored identifier was called without one.
    #[error("{operation} called with empty id field")]
    MissingIdentifier { operation: &'static str },
}

impl ValidationError {
    pub fn invalid_type(field: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::InvalidType {
            field,
            expected,
            found,
        }
    }

    pub fn invalid_category(value: impl Into<String>) -> Self {
        Self::InvalidCategory(value.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn missing_identifier(operation: &'static str) -> Self {
        Self::MissingIdentifier { operation }
    }
}
