//! The attribute sum type
//!
//! [`Attribute`] is a closed set of variants: null, atomic scalars, arrays and
//! dictionaries. Every container owns its children outright, so an attribute
//! graph is always a tree. Callers that need to share a subtree wrap it in
//! `Rc`/`Arc` themselves.
//!
//! ## Predicates
//!
//! - `is_atomic` is true for everything except arrays, dictionaries and null
//! - `is_number` additionally excludes strings and booleans

use crate::array::{AnyArray, Array, BoolArray};
use crate::atomic::{AnyAtomic, Atomic, Null};
use crate::dictionary::Dictionary;
use crate::tag::Tag;

/// Group name given to every attribute unless overridden
pub const DEFAULT_GROUP: &str = "core";

/// Metadata carried by every attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    group: String,
    description: Option<String>,
    summary: bool,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP.to_string(),
            description: None,
            summary: false,
        }
    }
}

impl Meta {
    /// Metadata for a summary instance (payload omitted)
    pub fn summary() -> Self {
        Self {
            summary: true,
            ..Self::default()
        }
    }

    /// Group name, `"core"` by default
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Set the group name
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    /// Optional free-text description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set or clear the description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// True when the instance was produced as a summary
    pub fn is_summary(&self) -> bool {
        self.summary
    }
}

/// Any SAL attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// Empty attribute
    Null(Null),
    /// Single scalar value
    Atomic(AnyAtomic),
    /// Multi-dimensional array
    Array(AnyArray),
    /// Keyed container
    Dictionary(Dictionary),
}

impl Attribute {
    /// Attribute tag; `Tag::Array` for every array regardless of element type
    pub fn tag(&self) -> Tag {
        match self {
            Attribute::Null(_) => Tag::Null,
            Attribute::Atomic(a) => a.tag(),
            Attribute::Array(_) => Tag::Array,
            Attribute::Dictionary(_) => Tag::Dictionary,
        }
    }

    /// Wire type name of this attribute
    pub fn type_name(&self) -> &'static str {
        self.tag().wire_name()
    }

    /// Attribute metadata
    pub fn meta(&self) -> &Meta {
        match self {
            Attribute::Null(n) => n.meta(),
            Attribute::Atomic(a) => a.meta(),
            Attribute::Array(a) => a.meta(),
            Attribute::Dictionary(d) => d.meta(),
        }
    }

    /// Mutable attribute metadata
    pub fn meta_mut(&mut self) -> &mut Meta {
        match self {
            Attribute::Null(n) => n.meta_mut(),
            Attribute::Atomic(a) => a.meta_mut(),
            Attribute::Array(a) => a.meta_mut(),
            Attribute::Dictionary(d) => d.meta_mut(),
        }
    }

    /// Group name
    pub fn group_name(&self) -> &str {
        self.meta().group()
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.meta().description()
    }

    /// True when produced as a summary
    pub fn is_summary(&self) -> bool {
        self.meta().is_summary()
    }

    /// Null attribute
    pub fn is_null(&self) -> bool {
        matches!(self, Attribute::Null(_))
    }

    /// Integer or floating point scalar
    pub fn is_number(&self) -> bool {
        !(self.is_array() || self.is_string() || self.is_boolean() || self.is_null() || self.is_object())
    }

    /// Boolean scalar
    pub fn is_boolean(&self) -> bool {
        self.tag() == Tag::Bool
    }

    /// Anything that is not an array, dictionary or null
    pub fn is_atomic(&self) -> bool {
        !(self.is_array() || self.is_object() || self.is_null())
    }

    /// Array of any element type
    pub fn is_array(&self) -> bool {
        matches!(self, Attribute::Array(_))
    }

    /// String scalar
    pub fn is_string(&self) -> bool {
        self.tag() == Tag::String
    }

    /// Dictionary
    pub fn is_object(&self) -> bool {
        matches!(self, Attribute::Dictionary(_))
    }

    /// Borrow as a specific variant
    pub fn downcast_ref<T: AttributeCast>(&self) -> Option<&T> {
        T::cast_ref(self)
    }

    /// Mutably borrow as a specific variant
    pub fn downcast_mut<T: AttributeCast>(&mut self) -> Option<&mut T> {
        T::cast_mut(self)
    }

    /// Convert into a specific variant, returning `self` on mismatch
    pub fn downcast<T: AttributeCast>(self) -> Result<T, Attribute> {
        T::cast(self)
    }
}

/// Conversion from [`Attribute`] to one of its concrete variants.
///
/// Implemented for [`Null`], [`Atomic<T>`], [`AnyAtomic`], [`Array<T>`],
/// [`BoolArray`], [`AnyArray`] and [`Dictionary`].
pub trait AttributeCast: Sized {
    /// Human readable name of the target variant, used in error messages
    const EXPECTED: &'static str;

    /// Borrow `attr` as `Self`
    fn cast_ref(attr: &Attribute) -> Option<&Self>;

    /// Mutably borrow `attr` as `Self`
    fn cast_mut(attr: &mut Attribute) -> Option<&mut Self>;

    /// Convert `attr` into `Self`
    fn cast(attr: Attribute) -> Result<Self, Attribute>;
}

macro_rules! impl_cast {
    ($ty:ty, $expected:expr, $pat:path) => {
        impl AttributeCast for $ty {
            const EXPECTED: &'static str = $expected;

            fn cast_ref(attr: &Attribute) -> Option<&Self> {
                match attr {
                    $pat(inner) => Some(inner),
                    _ => None,
                }
            }

            fn cast_mut(attr: &mut Attribute) -> Option<&mut Self> {
                match attr {
                    $pat(inner) => Some(inner),
                    _ => None,
                }
            }

            fn cast(attr: Attribute) -> Result<Self, Attribute> {
                match attr {
                    $pat(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

impl_cast!(Null, "null", Attribute::Null);
impl_cast!(AnyAtomic, "atomic", Attribute::Atomic);
impl_cast!(AnyArray, "array", Attribute::Array);
impl_cast!(Dictionary, "dictionary", Attribute::Dictionary);

macro_rules! impl_cast_atomic {
    ($($ty:ty => $variant:ident, $name:literal),* $(,)?) => {
        $(
            impl AttributeCast for Atomic<$ty> {
                const EXPECTED: &'static str = $name;

                fn cast_ref(attr: &Attribute) -> Option<&Self> {
                    match attr {
                        Attribute::Atomic(AnyAtomic::$variant(inner)) => Some(inner),
                        _ => None,
                    }
                }

                fn cast_mut(attr: &mut Attribute) -> Option<&mut Self> {
                    match attr {
                        Attribute::Atomic(AnyAtomic::$variant(inner)) => Some(inner),
                        _ => None,
                    }
                }

                fn cast(attr: Attribute) -> Result<Self, Attribute> {
                    match attr {
                        Attribute::Atomic(AnyAtomic::$variant(inner)) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl From<Atomic<$ty>> for Attribute {
                fn from(value: Atomic<$ty>) -> Self {
                    Attribute::Atomic(AnyAtomic::$variant(value))
                }
            }

            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute::Atomic(AnyAtomic::$variant(Atomic::new(value)))
                }
            }
        )*
    };
}

impl_cast_atomic! {
    i8 => Int8, "int8",
    i16 => Int16, "int16",
    i32 => Int32, "int32",
    i64 => Int64, "int64",
    u8 => UInt8, "uint8",
    u16 => UInt16, "uint16",
    u32 => UInt32, "uint32",
    u64 => UInt64, "uint64",
    f32 => Float32, "float32",
    f64 => Float64, "float64",
    bool => Bool, "bool",
    String => String, "string",
}

macro_rules! impl_cast_array {
    ($($ty:ty => $variant:ident, $name:literal),* $(,)?) => {
        $(
            impl AttributeCast for Array<$ty> {
                const EXPECTED: &'static str = $name;

                fn cast_ref(attr: &Attribute) -> Option<&Self> {
                    match attr {
                        Attribute::Array(AnyArray::$variant(inner)) => Some(inner),
                        _ => None,
                    }
                }

                fn cast_mut(attr: &mut Attribute) -> Option<&mut Self> {
                    match attr {
                        Attribute::Array(AnyArray::$variant(inner)) => Some(inner),
                        _ => None,
                    }
                }

                fn cast(attr: Attribute) -> Result<Self, Attribute> {
                    match attr {
                        Attribute::Array(AnyArray::$variant(inner)) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl From<Array<$ty>> for Attribute {
                fn from(value: Array<$ty>) -> Self {
                    Attribute::Array(AnyArray::$variant(value))
                }
            }
        )*
    };
}

impl_cast_array! {
    i8 => Int8, "array<int8>",
    i16 => Int16, "array<int16>",
    i32 => Int32, "array<int32>",
    i64 => Int64, "array<int64>",
    u8 => UInt8, "array<uint8>",
    u16 => UInt16, "array<uint16>",
    u32 => UInt32, "array<uint32>",
    u64 => UInt64, "array<uint64>",
    f32 => Float32, "array<float32>",
    f64 => Float64, "array<float64>",
    String => String, "array<string>",
}

impl AttributeCast for BoolArray {
    const EXPECTED: &'static str = "array<bool>";

    fn cast_ref(attr: &Attribute) -> Option<&Self> {
        match attr {
            Attribute::Array(AnyArray::Bool(inner)) => Some(inner),
            _ => None,
        }
    }

    fn cast_mut(attr: &mut Attribute) -> Option<&mut Self> {
        match attr {
            Attribute::Array(AnyArray::Bool(inner)) => Some(inner),
            _ => None,
        }
    }

    fn cast(attr: Attribute) -> Result<Self, Attribute> {
        match attr {
            Attribute::Array(AnyArray::Bool(inner)) => Ok(inner),
            other => Err(other),
        }
    }
}

impl From<Null> for Attribute {
    fn from(value: Null) -> Self {
        Attribute::Null(value)
    }
}

impl From<AnyAtomic> for Attribute {
    fn from(value: AnyAtomic) -> Self {
        Attribute::Atomic(value)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Atomic(AnyAtomic::from(value))
    }
}

impl From<AnyArray> for Attribute {
    fn from(value: AnyArray) -> Self {
        Attribute::Array(value)
    }
}

impl From<BoolArray> for Attribute {
    fn from(value: BoolArray) -> Self {
        Attribute::Array(AnyArray::Bool(value))
    }
}

impl From<Dictionary> for Attribute {
    fn from(value: Dictionary) -> Self {
        Attribute::Dictionary(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Attribute> {
        vec![
            Attribute::Null(Null::new()),
            Attribute::from(1i32),
            Attribute::from(1.5f64),
            Attribute::from(true),
            Attribute::from("text"),
            Attribute::from(Array::<f64>::new(&[2, 2])),
            Attribute::from(Dictionary::new()),
        ]
    }

    #[test]
    fn test_predicate_invariants() {
        for attr in samples() {
            assert_eq!(
                attr.is_atomic(),
                !(attr.is_array() || attr.is_object() || attr.is_null()),
                "is_atomic invariant for {}",
                attr.type_name()
            );
            assert_eq!(
                attr.is_number(),
                !(attr.is_array()
                    || attr.is_string()
                    || attr.is_boolean()
                    || attr.is_null()
                    || attr.is_object()),
                "is_number invariant for {}",
                attr.type_name()
            );
        }
    }

    #[test]
    fn test_predicates_per_variant() {
        let int = Attribute::from(3i8);
        assert!(int.is_number() && int.is_atomic());

        let flag = Attribute::from(false);
        assert!(flag.is_boolean() && flag.is_atomic() && !flag.is_number());

        let text = Attribute::from("a");
        assert!(text.is_string() && text.is_atomic() && !text.is_number());

        let arr = Attribute::from(Array::<String>::new(&[3]));
        assert!(arr.is_array() && !arr.is_string() && !arr.is_atomic());

        let null = Attribute::Null(Null::new());
        assert!(null.is_null() && !null.is_atomic() && !null.is_number());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Attribute::Null(Null::new()).type_name(), "null");
        assert_eq!(Attribute::from(1u16).type_name(), "uint16");
        assert_eq!(Attribute::from(Array::<i8>::new(&[1])).type_name(), "array");
        assert_eq!(Attribute::from(Dictionary::new()).type_name(), "dictionary");
    }

    #[test]
    fn test_default_group() {
        for attr in samples() {
            assert_eq!(attr.group_name(), DEFAULT_GROUP);
            assert!(attr.description().is_none());
            assert!(!attr.is_summary());
        }
    }

    #[test]
    fn test_downcast() {
        let attr = Attribute::from(12u32);
        assert_eq!(attr.downcast_ref::<Atomic<u32>>().map(|a| *a.value()), Some(12));
        assert!(attr.downcast_ref::<Atomic<i32>>().is_none());
        assert!(attr.downcast_ref::<AnyAtomic>().is_some());

        let attr = Attribute::from(BoolArray::new(&[4]));
        assert!(attr.downcast_ref::<BoolArray>().is_some());
        assert!(attr.downcast_ref::<Array<u8>>().is_none());

        let back = Attribute::from(2.0f32).downcast::<Atomic<f64>>();
        assert!(matches!(back, Err(Attribute::Atomic(AnyAtomic::Float32(_)))));
    }

    #[test]
    fn test_downcast_mut() {
        let mut attr = Attribute::from(1i64);
        if let Some(a) = attr.downcast_mut::<Atomic<i64>>() {
            a.set(99);
        }
        assert_eq!(attr, Attribute::from(99i64));
    }
}
