//! Unified error type for SAL data operations.
//!
//! Wraps the errors of `sal-core` and `sal-wire` so callers of the facade deal
//! with a single type.

use sal_core::{KeyError, OutOfRangeError, UsageError};
use sal_wire::DecodeError;
use thiserror::Error;

/// All SAL data errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Wire input could not be turned into an attribute
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Misuse of a valid attribute
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),

    /// Bounds-checked array access outside the shape
    #[error("out of range: {0}")]
    OutOfRange(#[from] OutOfRangeError),

    /// Dictionary key absent
    #[error(transparent)]
    NotFound(#[from] KeyError),

    /// Typed access found a different attribute variant
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected variant
        expected: String,
        /// Variant actually stored
        actual: String,
    },

    /// JSON text could not be produced
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for SAL data operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Check if this is a usage (programming) error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }

    /// Check if this is an out-of-range access.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange(_))
    }

    /// Check if this is a missing dictionary key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a typed-access mismatch.
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }

    /// Check if this error signals a bug in the calling code rather than bad input.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::OutOfRange(_))
    }
}

// Convert from in-memory attribute errors
impl From<sal_core::Error> for Error {
    fn from(e: sal_core::Error) -> Self {
        use sal_core::Error as CoreError;
        match e {
            CoreError::Usage(err) => Error::Usage(err),
            CoreError::OutOfRange(err) => Error::OutOfRange(err),
            CoreError::Key(err) => Error::NotFound(err),
            CoreError::WrongType { expected, actual } => Error::WrongType {
                expected: expected.to_string(),
                actual: actual.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
