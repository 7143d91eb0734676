//! Leaf scalar attributes: [`Null`] and [`Atomic<T>`]

use std::fmt;

use crate::attribute::Meta;
use crate::tag::{Element, Tag};

/// Empty attribute, the in-memory counterpart of a JSON `null` node.
///
/// `Null` is only ever constructed explicitly. Null entries met while decoding
/// a dictionary are dropped by the container instead of being materialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Null {
    meta: Meta,
}

impl Null {
    /// Create a null attribute
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

/// A single value of one of the registered element types.
///
/// The tag and wire name are bound to `T` through the type registry and
/// cannot change after construction; the value itself may be mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Atomic<T: Element> {
    value: T,
    meta: Meta,
}

impl<T: Element> Atomic<T> {
    /// Wrap `value`
    pub fn new(value: T) -> Self {
        Self {
            value,
            meta: Meta::default(),
        }
    }

    /// Element tag of the held value
    pub fn tag(&self) -> Tag {
        T::TAG
    }

    /// Wire type name of the held value
    pub fn type_name(&self) -> &'static str {
        T::TAG.wire_name()
    }

    /// The held value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the held value
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replace the held value
    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// Consume the attribute, returning the value
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

impl<T: Element> From<T> for Atomic<T> {
    fn from(value: T) -> Self {
        Atomic::new(value)
    }
}

impl<T: Element + fmt::Display> fmt::Display for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.value)
    }
}

/// Signed 8-bit scalar
pub type Int8 = Atomic<i8>;
/// Signed 16-bit scalar
pub type Int16 = Atomic<i16>;
/// Signed 32-bit scalar
pub type Int32 = Atomic<i32>;
/// Signed 64-bit scalar
pub type Int64 = Atomic<i64>;
/// Unsigned 8-bit scalar
pub type UInt8 = Atomic<u8>;
/// Unsigned 16-bit scalar
pub type UInt16 = Atomic<u16>;
/// Unsigned 32-bit scalar
pub type UInt32 = Atomic<u32>;
/// Unsigned 64-bit scalar
pub type UInt64 = Atomic<u64>;
/// Single precision scalar
pub type Float32 = Atomic<f32>;
/// Double precision scalar
pub type Float64 = Atomic<f64>;
/// Boolean scalar
pub type Bool = Atomic<bool>;
/// String scalar
pub type Str = Atomic<String>;

/// An atomic attribute of any element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyAtomic {
    /// `int8`
    Int8(Atomic<i8>),
    /// `int16`
    Int16(Atomic<i16>),
    /// `int32`
    Int32(Atomic<i32>),
    /// `int64`
    Int64(Atomic<i64>),
    /// `uint8`
    UInt8(Atomic<u8>),
    /// `uint16`
    UInt16(Atomic<u16>),
    /// `uint32`
    UInt32(Atomic<u32>),
    /// `uint64`
    UInt64(Atomic<u64>),
    /// `float32`
    Float32(Atomic<f32>),
    /// `float64`
    Float64(Atomic<f64>),
    /// `bool`
    Bool(Atomic<bool>),
    /// `string`
    String(Atomic<String>),
}

macro_rules! with_atomic {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnyAtomic::Int8($inner) => $body,
            AnyAtomic::Int16($inner) => $body,
            AnyAtomic::Int32($inner) => $body,
            AnyAtomic::Int64($inner) => $body,
            AnyAtomic::UInt8($inner) => $body,
            AnyAtomic::UInt16($inner) => $body,
            AnyAtomic::UInt32($inner) => $body,
            AnyAtomic::UInt64($inner) => $body,
            AnyAtomic::Float32($inner) => $body,
            AnyAtomic::Float64($inner) => $body,
            AnyAtomic::Bool($inner) => $body,
            AnyAtomic::String($inner) => $body,
        }
    };
}

impl AnyAtomic {
    /// Element tag of the held value
    pub fn tag(&self) -> Tag {
        with_atomic!(self, a => a.tag())
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        with_atomic!(self, a => a.meta())
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        with_atomic!(self, a => a.meta_mut())
    }

    /// Numeric value widened to `f64`, if the value is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnyAtomic::Int8(a) => Some(f64::from(*a.value())),
            AnyAtomic::Int16(a) => Some(f64::from(*a.value())),
            AnyAtomic::Int32(a) => Some(f64::from(*a.value())),
            AnyAtomic::Int64(a) => Some(*a.value() as f64),
            AnyAtomic::UInt8(a) => Some(f64::from(*a.value())),
            AnyAtomic::UInt16(a) => Some(f64::from(*a.value())),
            AnyAtomic::UInt32(a) => Some(f64::from(*a.value())),
            AnyAtomic::UInt64(a) => Some(*a.value() as f64),
            AnyAtomic::Float32(a) => Some(f64::from(*a.value())),
            AnyAtomic::Float64(a) => Some(*a.value()),
            AnyAtomic::Bool(_) | AnyAtomic::String(_) => None,
        }
    }

    /// String value, if this is a string atomic
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyAtomic::String(a) => Some(a.value()),
            _ => None,
        }
    }

    /// Boolean value, if this is a bool atomic
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyAtomic::Bool(a) => Some(*a.value()),
            _ => None,
        }
    }
}

macro_rules! impl_any_atomic_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Atomic<$ty>> for AnyAtomic {
                fn from(value: Atomic<$ty>) -> Self {
                    AnyAtomic::$variant(value)
                }
            }

            impl From<$ty> for AnyAtomic {
                fn from(value: $ty) -> Self {
                    AnyAtomic::$variant(Atomic::new(value))
                }
            }
        )*
    };
}

impl_any_atomic_from! {
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
    bool => Bool,
    String => String,
}

impl From<&str> for AnyAtomic {
    fn from(value: &str) -> Self {
        AnyAtomic::String(Atomic::new(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_binds_tag() {
        assert_eq!(Atomic::new(1i8).tag(), Tag::Int8);
        assert_eq!(Atomic::new(1u64).type_name(), "uint64");
        assert_eq!(Atomic::new(2.5f32).type_name(), "float32");
        assert_eq!(Atomic::new(true).tag(), Tag::Bool);
        assert_eq!(Atomic::new("x".to_string()).type_name(), "string");
    }

    #[test]
    fn test_atomic_value_mutation() {
        let mut a = Atomic::new(10i32);
        *a.value_mut() += 5;
        assert_eq!(*a.value(), 15);
        a.set(-1);
        assert_eq!(a.into_inner(), -1);
    }

    #[test]
    fn test_atomic_default_value() {
        let a: Atomic<f64> = Atomic::default();
        assert_eq!(*a.value(), 0.0);
        assert_eq!(a.meta().group(), "core");
        assert!(!a.meta().is_summary());
    }

    #[test]
    fn test_any_atomic_tags() {
        assert_eq!(AnyAtomic::from(3i16).tag(), Tag::Int16);
        assert_eq!(AnyAtomic::from("ipla").tag(), Tag::String);
        assert_eq!(AnyAtomic::from(false).tag(), Tag::Bool);
    }

    #[test]
    fn test_any_atomic_accessors() {
        assert_eq!(AnyAtomic::from(7u32).as_f64(), Some(7.0));
        assert_eq!(AnyAtomic::from(true).as_f64(), None);
        assert_eq!(AnyAtomic::from("a").as_str(), Some("a"));
        assert_eq!(AnyAtomic::from(true).as_bool(), Some(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Atomic::new(42i64).to_string(), "int64(42)");
    }
}
