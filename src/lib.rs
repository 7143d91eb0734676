//! # SAL data
//!
//! Typed attribute model and JSON wire codec for the Simple Access Layer data
//! protocol.
//!
//! A SAL node is an attribute tree: scalars, N-dimensional arrays and
//! dictionaries of further attributes. This crate brings together
//!
//! - `sal-core`: the attribute types, strided arrays and type registry
//! - `sal-wire`: the JSON encoding, decode dispatcher and summary protocol
//!
//! behind one error type and a handful of text-level entry points.
//!
//! ## Quick Start
//!
//! ```
//! use sal_data::prelude::*;
//!
//! let mut signal = Float64Array::new(&[2, 3]);
//! signal[(1, 2)] = 0.25;
//!
//! let mut node = Dictionary::new();
//! node.set("signal", signal);
//! node.set("units", "T");
//!
//! // Full encoding for transmission
//! let text = sal_data::to_json_string(&node)?;
//!
//! // Summaries omit array data and dictionary contents
//! let summary = sal_data::summary_string(&node);
//! assert_eq!(summary, r#"{"type":"dictionary"}"#);
//!
//! // Decode whatever comes back
//! let decoded = sal_data::from_json_str_as::<Dictionary>(&text)?;
//! let signal = decoded.get_as::<Float64Array>("signal")?;
//! assert_eq!(*signal.at(&[1, 2])?, 0.25);
//! # Ok::<(), sal_data::Error>(())
//! ```
//!
//! ## Summaries
//!
//! Every attribute has a full and a summary encoding. Atomic summaries keep
//! their value; array summaries keep shape and element type; dictionary
//! summaries keep nothing but the type. Decoding a summary produces an
//! attribute whose `is_summary()` is true.

#![warn(missing_docs)]

mod error;
mod text;

pub mod prelude;

pub use error::{Error, Result};
pub use text::{
    from_json_str, from_json_str_as, from_json_str_with, summary_string, to_json_string,
    to_json_string_with,
};

// Attribute model
pub use sal_core::{
    lookup, tag_of, wire_name_of, AnyArray, AnyAtomic, Array, Atomic, Attribute, AttributeCast,
    BoolArray, Dictionary, Element, KeyError, MatrixView, Meta, Null, OutOfRangeError, Tag,
    UsageError, DEFAULT_GROUP,
};

// Array addressing
pub use sal_core::{
    checked_element_count, element_count, row_major_strides, MAX_INDEXED_DIMENSIONS,
};

// Type aliases
pub use sal_core::{
    Bool, Float32, Float32Array, Float64, Float64Array, Int16, Int16Array, Int32, Int32Array,
    Int64, Int64Array, Int8, Int8Array, Str, StringArray, UInt16, UInt16Array, UInt32,
    UInt32Array, UInt64, UInt64Array, UInt8, UInt8Array,
};

// Wire codec
pub use sal_wire::{
    decode_as, decode_as_with, decode_str, decode_str_with, Base64Alphabet, Codec, CodecBuilder,
    Decode, DecodeError, DecodeErrorKind, Encode, WireElement, ENCODING_BASE64, ENCODING_LIST,
    SPECIAL_FLOAT_KEY,
};
