//! Convenient imports for SAL data.
//!
//! ```
//! use sal_data::prelude::*;
//!
//! let attr = Attribute::decode(&json!({"type": "int32", "value": 3}))?;
//! assert!(attr.is_number());
//! # Ok::<(), sal_data::Error>(())
//! ```

// Error handling
pub use crate::error::{Error, Result};

// Attribute model
pub use sal_core::{
    AnyArray, AnyAtomic, Array, Atomic, Attribute, AttributeCast, BoolArray, Dictionary, Null,
    Tag,
};

// Array aliases
pub use sal_core::{
    Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array, StringArray,
    UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};

// Codec
pub use sal_wire::{Codec, Decode, Encode};

// Re-export serde_json for convenience
pub use serde_json::json;
