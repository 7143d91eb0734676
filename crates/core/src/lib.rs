//! Attribute type hierarchy for the Simple Access Layer
//!
//! SAL data is a tree of attributes. Every node is one of a closed set of
//! variants:
//!
//! | Variant | Type | Holds |
//! |---------|------|-------|
//! | Null | [`Null`] | nothing |
//! | Atomic | [`Atomic<T>`] / [`AnyAtomic`] | one scalar of an element type |
//! | Array | [`Array<T>`] / [`BoolArray`] / [`AnyArray`] | row-major N-d buffer |
//! | Dictionary | [`Dictionary`] | string-keyed owned children |
//!
//! The element types (`int8` ... `uint64`, `float32`, `float64`, `bool`,
//! `string`) are fixed by the sealed [`Element`] trait; see [`tag`] for the
//! wire name of each.
//!
//! Wire encoding lives in `sal-wire`. This crate has no knowledge of JSON.
//!
//! ## Example
//!
//! ```
//! use sal_core::{Array, Attribute, Dictionary};
//!
//! let mut signal = Array::<f64>::new(&[3, 2]);
//! signal[(2, 1)] = 4.5;
//!
//! let mut dict = Dictionary::new();
//! dict.set("signal", signal);
//! dict.set("units", "V");
//!
//! let stored = dict.get_as::<Array<f64>>("signal").unwrap();
//! assert_eq!(*stored.at(&[2, 1]).unwrap(), 4.5);
//! assert!(dict.get("units").unwrap().is_string());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod atomic;
pub mod attribute;
pub mod dictionary;
pub mod error;
pub mod tag;

pub use array::{
    checked_element_count, element_count, row_major_strides, AnyArray, Array, BoolArray,
    Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array, MatrixView,
    StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array, MAX_INDEXED_DIMENSIONS,
};
pub use atomic::{
    AnyAtomic, Atomic, Bool, Float32, Float64, Int16, Int32, Int64, Int8, Null, Str, UInt16,
    UInt32, UInt64, UInt8,
};
pub use attribute::{Attribute, AttributeCast, Meta, DEFAULT_GROUP};
pub use dictionary::Dictionary;
pub use error::{Error, KeyError, OutOfRangeError, Result, UsageError};
pub use tag::{lookup, tag_of, wire_name_of, Element, Tag};
