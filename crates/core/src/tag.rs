//! Type registry for SAL attributes
//!
//! This module is the single source of truth relating a Rust element type to
//! its attribute [`Tag`] and to the wire type name used in serialized objects.
//!
//! ## Wire Names
//!
//! Element names follow `numpy.dtype` type names so that the Python server and
//! this client share one vocabulary:
//!
//! | Tag | Wire name | Rust type |
//! |-----|-----------|-----------|
//! | Null | `null` | - |
//! | Int8 / Int16 / Int32 / Int64 | `int8` ... `int64` | `i8` ... `i64` |
//! | UInt8 / UInt16 / UInt32 / UInt64 | `uint8` ... `uint64` | `u8` ... `u64` |
//! | Float32 / Float64 | `float32` / `float64` | `f32` / `f64` |
//! | Bool | `bool` | `bool` |
//! | String | `string` | `String` |
//! | Array | `array` | [`crate::Array`] |
//! | Dictionary | `dictionary` | [`crate::Dictionary`] |
//!
//! Compile-time lookups go through the sealed [`Element`] trait, so asking for
//! the tag of an unsupported type does not compile. [`lookup`] is the runtime
//! counterpart for code that only holds a `TypeId`.

use std::any::{type_name, TypeId};
use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::UsageError;

/// Attribute tag: the closed set of attribute variants and element types.
///
/// A tag is fixed when an attribute is constructed and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Empty attribute, JSON null
    Null,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 8-bit integer
    UInt8,
    /// Unsigned 16-bit integer
    UInt16,
    /// Unsigned 32-bit integer
    UInt32,
    /// Unsigned 64-bit integer
    UInt64,
    /// IEEE-754 single precision
    Float32,
    /// IEEE-754 double precision
    Float64,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Multi-dimensional array with a single element type
    Array,
    /// Keyed container of attributes
    Dictionary,
}

impl Tag {
    /// Every tag, in declaration order.
    pub const ALL: [Tag; 15] = [
        Tag::Null,
        Tag::Int8,
        Tag::Int16,
        Tag::Int32,
        Tag::Int64,
        Tag::UInt8,
        Tag::UInt16,
        Tag::UInt32,
        Tag::UInt64,
        Tag::Float32,
        Tag::Float64,
        Tag::Bool,
        Tag::String,
        Tag::Array,
        Tag::Dictionary,
    ];

    /// Wire type name for this tag
    pub const fn wire_name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Int8 => "int8",
            Tag::Int16 => "int16",
            Tag::Int32 => "int32",
            Tag::Int64 => "int64",
            Tag::UInt8 => "uint8",
            Tag::UInt16 => "uint16",
            Tag::UInt32 => "uint32",
            Tag::UInt64 => "uint64",
            Tag::Float32 => "float32",
            Tag::Float64 => "float64",
            Tag::Bool => "bool",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Dictionary => "dictionary",
        }
    }

    /// Resolve a wire type name to its tag.
    ///
    /// Returns `None` for names outside the registry; decoders turn that into
    /// a decode error rather than a panic.
    pub fn from_wire_name(name: &str) -> Option<Tag> {
        WIRE_NAMES.get(name).copied()
    }

    /// True for tags that can be the element type of an array
    pub fn is_element(self) -> bool {
        !matches!(self, Tag::Null | Tag::Array | Tag::Dictionary)
    }

    /// True for integer and floating point element tags
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Tag::Int8
                | Tag::Int16
                | Tag::Int32
                | Tag::Int64
                | Tag::UInt8
                | Tag::UInt16
                | Tag::UInt32
                | Tag::UInt64
                | Tag::Float32
                | Tag::Float64
        )
    }

    /// Fixed width in bytes of one element of this type, if any.
    ///
    /// Strings and containers have no fixed width.
    pub const fn element_width(self) -> Option<usize> {
        match self {
            Tag::Int8 | Tag::UInt8 | Tag::Bool => Some(1),
            Tag::Int16 | Tag::UInt16 => Some(2),
            Tag::Int32 | Tag::UInt32 | Tag::Float32 => Some(4),
            Tag::Int64 | Tag::UInt64 | Tag::Float64 => Some(8),
            Tag::Null | Tag::String | Tag::Array | Tag::Dictionary => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

static WIRE_NAMES: Lazy<FxHashMap<&'static str, Tag>> =
    Lazy::new(|| Tag::ALL.iter().map(|tag| (tag.wire_name(), *tag)).collect());

static TYPE_IDS: Lazy<FxHashMap<TypeId, Tag>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert(TypeId::of::<i8>(), Tag::Int8);
    map.insert(TypeId::of::<i16>(), Tag::Int16);
    map.insert(TypeId::of::<i32>(), Tag::Int32);
    map.insert(TypeId::of::<i64>(), Tag::Int64);
    map.insert(TypeId::of::<u8>(), Tag::UInt8);
    map.insert(TypeId::of::<u16>(), Tag::UInt16);
    map.insert(TypeId::of::<u32>(), Tag::UInt32);
    map.insert(TypeId::of::<u64>(), Tag::UInt64);
    map.insert(TypeId::of::<f32>(), Tag::Float32);
    map.insert(TypeId::of::<f64>(), Tag::Float64);
    map.insert(TypeId::of::<bool>(), Tag::Bool);
    map.insert(TypeId::of::<String>(), Tag::String);
    map.insert(TypeId::of::<crate::Null>(), Tag::Null);
    map.insert(TypeId::of::<crate::Dictionary>(), Tag::Dictionary);
    map.insert(TypeId::of::<crate::AnyArray>(), Tag::Array);
    map.insert(TypeId::of::<crate::BoolArray>(), Tag::Array);
    map
});

/// Runtime tag lookup for an arbitrary Rust type.
///
/// Array types resolve to [`Tag::Array`] only through [`crate::AnyArray`] and
/// [`crate::BoolArray`]; typed `Array<T>` callers should use `Tag::Array`
/// directly.
pub fn lookup<T: 'static>() -> Result<Tag, UsageError> {
    TYPE_IDS
        .get(&TypeId::of::<T>())
        .copied()
        .ok_or(UsageError::UnsupportedType {
            type_name: type_name::<T>(),
        })
}

mod sealed {
    pub trait Sealed {}
}

/// A native type that can be held by an [`crate::Atomic`] or stored in an
/// [`crate::Array`].
///
/// The trait is sealed: the supported set is exactly the twelve element tags.
pub trait Element: sealed::Sealed + Clone + Default + PartialEq + fmt::Debug + 'static {
    /// Tag bound to this type
    const TAG: Tag;

    /// View a buffer of elements as raw bytes in native layout.
    ///
    /// `None` when the element storage is not contiguous fixed-size data.
    fn raw_bytes(data: &[Self]) -> Option<&[u8]>;

    /// Mutable counterpart of [`Element::raw_bytes`]
    fn raw_bytes_mut(data: &mut [Self]) -> Option<&mut [u8]>;
}

macro_rules! impl_plain_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const TAG: Tag = Tag::$tag;

                fn raw_bytes(data: &[Self]) -> Option<&[u8]> {
                    Some(bytemuck::cast_slice(data))
                }

                fn raw_bytes_mut(data: &mut [Self]) -> Option<&mut [u8]> {
                    Some(bytemuck::cast_slice_mut(data))
                }
            }
        )*
    };
}

impl_plain_element! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}

impl sealed::Sealed for bool {}

impl Element for bool {
    const TAG: Tag = Tag::Bool;

    fn raw_bytes(data: &[Self]) -> Option<&[u8]> {
        Some(bytemuck::cast_slice(data))
    }

    fn raw_bytes_mut(_data: &mut [Self]) -> Option<&mut [u8]> {
        // arbitrary bytes are not valid bools
        None
    }
}

impl sealed::Sealed for String {}

impl Element for String {
    const TAG: Tag = Tag::String;

    fn raw_bytes(_data: &[Self]) -> Option<&[u8]> {
        None
    }

    fn raw_bytes_mut(_data: &mut [Self]) -> Option<&mut [u8]> {
        None
    }
}

/// Tag bound to `T` at compile time
pub const fn tag_of<T: Element>() -> Tag {
    T::TAG
}

/// Wire type name bound to `T` at compile time
pub const fn wire_name_of<T: Element>() -> &'static str {
    T::TAG.wire_name()
}
