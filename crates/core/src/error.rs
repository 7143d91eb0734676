//! Error types for in-memory attribute operations
//!
//! Decoding failures live in `sal-wire`; the errors here cover misuse of an
//! already-valid attribute:
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`UsageError`] | raw buffer access on string arrays, unregistered types, matrix view on non-2-D arrays |
//! | [`OutOfRangeError`] | bounds-checked multi-index access |
//! | [`KeyError`] | dictionary access with an absent key |

use thiserror::Error;

use crate::tag::Tag;

/// Misuse of an attribute that is valid in itself.
///
/// These indicate programming errors and are not expected to be recovered
/// from at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Raw buffer access requested for an element type without contiguous storage
    #[error("raw buffer access is not supported for `{element}` arrays")]
    NonContiguousBuffer {
        /// Element type of the array
        element: Tag,
    },

    /// Type is not part of the attribute registry
    #[error("type `{type_name}` is not a registered attribute type")]
    UnsupportedType {
        /// Rust type name
        type_name: &'static str,
    },

    /// Matrix view requested on an array that is not 2-dimensional
    #[error("matrix view requires a 2-dimensional array, found {dimension} dimensions")]
    NotAMatrix {
        /// Actual dimension count
        dimension: usize,
    },

    /// Element count of the shape does not fit in `usize`
    #[error("shape {shape:?} describes more elements than can be addressed")]
    ShapeOverflow {
        /// The offending shape
        shape: Vec<usize>,
    },

    /// Element buffer for the shape could not be allocated
    #[error("cannot allocate a buffer of {elements} elements")]
    AllocationFailed {
        /// Element count requested
        elements: usize,
    },

    /// Buffer length does not match the element count implied by the shape
    #[error("shape requires {expected} elements, buffer holds {actual}")]
    ShapeMismatch {
        /// Element count derived from the shape
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
}

/// Bounds-checked array access outside the array shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutOfRangeError {
    /// Array has more dimensions than bounded access supports
    #[error("bounded access supports at most {max} dimensions, array has {dimension}")]
    TooManyDimensions {
        /// Array dimension count
        dimension: usize,
        /// Supported maximum
        max: usize,
    },

    /// Number of indices differs from the array dimension count
    #[error("array has {expected} dimensions, {actual} indices given")]
    IndexCountMismatch {
        /// Array dimension count
        expected: usize,
        /// Number of indices supplied
        actual: usize,
    },

    /// Index outside `[0, extent)` on one axis
    #[error("index {index} out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfBounds {
        /// Axis position
        axis: usize,
        /// Offending index
        index: usize,
        /// Extent of the axis
        extent: usize,
    },

    /// Array is a summary and holds no elements
    #[error("array is a summary and holds no elements")]
    EmptyBuffer,
}

/// Dictionary key not present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key not found: {key}")]
pub struct KeyError {
    /// The missing key
    pub key: String,
}

impl KeyError {
    /// Create a key error for `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Any in-memory attribute error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// See [`UsageError`]
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// See [`OutOfRangeError`]
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),

    /// See [`KeyError`]
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Typed access found a different attribute variant
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Requested variant
        expected: &'static str,
        /// Variant actually stored
        actual: &'static str,
    },
}

/// Result type for in-memory attribute operations
pub type Result<T> = std::result::Result<T, Error>;
