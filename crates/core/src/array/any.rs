//! Element-type-erased array

use crate::attribute::Meta;
use crate::error::UsageError;
use crate::tag::Tag;

use super::{Array, BoolArray};

/// An array of any supported element type.
///
/// Exposes the shape-level metadata every array shares without knowing the
/// element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyArray {
    /// `int8` elements
    Int8(Array<i8>),
    /// `int16` elements
    Int16(Array<i16>),
    /// `int32` elements
    Int32(Array<i32>),
    /// `int64` elements
    Int64(Array<i64>),
    /// `uint8` elements
    UInt8(Array<u8>),
    /// `uint16` elements
    UInt16(Array<u16>),
    /// `uint32` elements
    UInt32(Array<u32>),
    /// `uint64` elements
    UInt64(Array<u64>),
    /// `float32` elements
    Float32(Array<f32>),
    /// `float64` elements
    Float64(Array<f64>),
    /// `bool` elements over byte storage
    Bool(BoolArray),
    /// `string` elements
    String(Array<String>),
}

macro_rules! with_array {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnyArray::Int8($inner) => $body,
            AnyArray::Int16($inner) => $body,
            AnyArray::Int32($inner) => $body,
            AnyArray::Int64($inner) => $body,
            AnyArray::UInt8($inner) => $body,
            AnyArray::UInt16($inner) => $body,
            AnyArray::UInt32($inner) => $body,
            AnyArray::UInt64($inner) => $body,
            AnyArray::Float32($inner) => $body,
            AnyArray::Float64($inner) => $body,
            AnyArray::Bool($inner) => $body,
            AnyArray::String($inner) => $body,
        }
    };
}

impl AnyArray {
    /// Default-filled array for an element tag.
    ///
    /// Returns `None` when `element` is not an element tag.
    pub fn with_shape(element: Tag, shape: &[usize]) -> Option<Self> {
        Some(match element {
            Tag::Int8 => AnyArray::Int8(Array::new(shape)),
            Tag::Int16 => AnyArray::Int16(Array::new(shape)),
            Tag::Int32 => AnyArray::Int32(Array::new(shape)),
            Tag::Int64 => AnyArray::Int64(Array::new(shape)),
            Tag::UInt8 => AnyArray::UInt8(Array::new(shape)),
            Tag::UInt16 => AnyArray::UInt16(Array::new(shape)),
            Tag::UInt32 => AnyArray::UInt32(Array::new(shape)),
            Tag::UInt64 => AnyArray::UInt64(Array::new(shape)),
            Tag::Float32 => AnyArray::Float32(Array::new(shape)),
            Tag::Float64 => AnyArray::Float64(Array::new(shape)),
            Tag::Bool => AnyArray::Bool(BoolArray::new(shape)),
            Tag::String => AnyArray::String(Array::new(shape)),
            Tag::Null | Tag::Array | Tag::Dictionary => return None,
        })
    }

    /// Summary array (shape only) for an element tag
    pub fn summary(element: Tag, shape: &[usize]) -> Option<Self> {
        Some(match element {
            Tag::Int8 => AnyArray::Int8(Array::new_summary(shape)),
            Tag::Int16 => AnyArray::Int16(Array::new_summary(shape)),
            Tag::Int32 => AnyArray::Int32(Array::new_summary(shape)),
            Tag::Int64 => AnyArray::Int64(Array::new_summary(shape)),
            Tag::UInt8 => AnyArray::UInt8(Array::new_summary(shape)),
            Tag::UInt16 => AnyArray::UInt16(Array::new_summary(shape)),
            Tag::UInt32 => AnyArray::UInt32(Array::new_summary(shape)),
            Tag::UInt64 => AnyArray::UInt64(Array::new_summary(shape)),
            Tag::Float32 => AnyArray::Float32(Array::new_summary(shape)),
            Tag::Float64 => AnyArray::Float64(Array::new_summary(shape)),
            Tag::Bool => AnyArray::Bool(BoolArray::new_summary(shape)),
            Tag::String => AnyArray::String(Array::new_summary(shape)),
            Tag::Null | Tag::Array | Tag::Dictionary => return None,
        })
    }

    /// Extent of every dimension
    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    /// Row-major strides
    pub fn strides(&self) -> &[usize] {
        with_array!(self, a => a.strides())
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        with_array!(self, a => a.dimension())
    }

    /// Number of elements held
    pub fn size(&self) -> usize {
        with_array!(self, a => a.size())
    }

    /// Buffer size in bytes
    pub fn byte_size(&self) -> usize {
        with_array!(self, a => a.byte_size())
    }

    /// Element tag
    pub fn element_type(&self) -> Tag {
        with_array!(self, a => a.element_type())
    }

    /// Element wire type name
    pub fn element_type_name(&self) -> &'static str {
        self.element_type().wire_name()
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        with_array!(self, a => a.meta())
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        with_array!(self, a => a.meta_mut())
    }

    /// True when produced as a summary
    pub fn is_summary(&self) -> bool {
        self.meta().is_summary()
    }

    /// Raw buffer bytes; fails for string arrays
    pub fn as_bytes(&self) -> Result<&[u8], UsageError> {
        with_array!(self, a => a.as_bytes())
    }

    /// Writable raw buffer bytes; fails for string arrays
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8], UsageError> {
        with_array!(self, a => a.as_bytes_mut())
    }
}

macro_rules! impl_any_array_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Array<$ty>> for AnyArray {
                fn from(value: Array<$ty>) -> Self {
                    AnyArray::$variant(value)
                }
            }
        )*
    };
}

impl_any_array_from! {
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
    String => String,
}

impl From<BoolArray> for AnyArray {
    fn from(value: BoolArray) -> Self {
        AnyArray::Bool(value)
    }
}
