//! Wire encoding for SAL attributes
//!
//! This crate implements the JSON wire contract of the Simple Access Layer
//! data model. Every node is a JSON object with a mandatory `type` key:
//!
//! | Attribute | JSON encoding |
//! |-----------|---------------|
//! | Null | `{"type":"null","value":null}` |
//! | Atomic | `{"type":"<elem>","value":<v>}` |
//! | Array | `{"type":"array","value":{"type":"<elem>","shape":[..],"encoding":"base64"\|"list","data":..}}` |
//! | Dictionary | `{"type":"dictionary","items":{"<key>":<node>,..}}` |
//!
//! Numeric and boolean arrays travel as base64 text of their raw row-major
//! buffer; string arrays travel as nested lists, one level per dimension.
//!
//! ## Examples
//!
//! ```
//! use sal_core::{Array, Attribute};
//! use sal_wire::{Decode, Encode};
//!
//! let signal = Array::from_vec(&[3], vec![1.0f64, 2.0, 3.0]).unwrap();
//! let wire = signal.encode();
//! assert_eq!(wire["value"]["encoding"], "base64");
//!
//! let decoded = Attribute::decode(&wire).unwrap();
//! assert_eq!(decoded, Attribute::from(signal));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

// Re-export main types
pub use json::{
    decode_as, decode_as_with, decode_str, decode_str_with, Base64Alphabet, Codec, CodecBuilder,
    Decode, DecodeError, DecodeErrorKind, Encode, WireElement, ENCODING_BASE64, ENCODING_LIST,
    SPECIAL_FLOAT_KEY,
};
