//! JSON encoding for SAL attributes
//!
//! Every node carries a `type` key naming its variant:
//!
//! | Variant | Full | Summary |
//! |---------|------|---------|
//! | Null | `{type:"null", value:null}` | `{type:"null"}` |
//! | Atomic | `{type:<elem>, value:<v>}` | same as full |
//! | Array | `{type:"array", value:{type:<elem>, shape, encoding, data}}` | `{type:"array", shape, element_type}` |
//! | Dictionary | `{type:"dictionary", items:{key: <child>, ...}}` | `{type:"dictionary"}` |
//!
//! A `description` key is added to either form when the attribute has one.
//! Encoding a summary instance with [`Encode::encode`] yields its summary form.

use serde_json::{Map, Value};

use sal_core::{AnyArray, AnyAtomic, Array, Atomic, Attribute, BoolArray, Dictionary, Meta, Null};

use super::array::encode_payload;
use super::config::Codec;
use super::element::WireElement;

/// Wire encoding of an attribute.
pub trait Encode {
    /// Full encoding using `codec`
    fn encode_with(&self, codec: &Codec) -> Value;

    /// Lightweight encoding without bulk payload
    fn encode_summary(&self) -> Value;

    /// Full encoding with the default codec
    fn encode(&self) -> Value {
        self.encode_with(&Codec::default())
    }

    /// Summary encoding as JSON text
    fn summary(&self) -> String {
        self.encode_summary().to_string()
    }
}

fn header(type_name: &str, meta: &Meta) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert("type".into(), Value::from(type_name));
    if let Some(description) = meta.description() {
        object.insert("description".into(), Value::from(description));
    }
    object
}

impl Encode for Null {
    fn encode_with(&self, _codec: &Codec) -> Value {
        let mut object = header("null", self.meta());
        object.insert("value".into(), Value::Null);
        Value::Object(object)
    }

    fn encode_summary(&self) -> Value {
        Value::Object(header("null", self.meta()))
    }
}

impl<T: WireElement> Encode for Atomic<T> {
    fn encode_with(&self, _codec: &Codec) -> Value {
        let mut object = header(self.type_name(), self.meta());
        object.insert("value".into(), self.value().to_json());
        Value::Object(object)
    }

    fn encode_summary(&self) -> Value {
        self.encode_with(&Codec::default())
    }
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

impl Encode for AnyAtomic {
    fn encode_with(&self, codec: &Codec) -> Value {
        with_atomic!(self, a => a.encode_with(codec))
    }

    fn encode_summary(&self) -> Value {
        with_atomic!(self, a => a.encode_summary())
    }
}

fn array_summary(shape: &[usize], element: &str, meta: &Meta) -> Value {
    let mut object = header("array", meta);
    object.insert("shape".into(), Value::from(shape.to_vec()));
    object.insert("element_type".into(), Value::from(element));
    Value::Object(object)
}

impl<T: WireElement> Encode for Array<T> {
    fn encode_with(&self, codec: &Codec) -> Value {
        if self.is_summary() {
            return self.encode_summary();
        }
        let (encoding, data) = encode_payload(self, codec);

        let mut definition = Map::new();
        definition.insert("type".into(), Value::from(self.element_type_name()));
        definition.insert("shape".into(), Value::from(self.shape().to_vec()));
        definition.insert("encoding".into(), Value::from(encoding));
        definition.insert("data".into(), data);

        let mut object = header("array", self.meta());
        object.insert("value".into(), Value::Object(definition));
        Value::Object(object)
    }

    fn encode_summary(&self) -> Value {
        array_summary(self.shape(), self.element_type_name(), self.meta())
    }
}

impl Encode for BoolArray {
    fn encode_with(&self, codec: &Codec) -> Value {
        self.storage().encode_with(codec)
    }

    fn encode_summary(&self) -> Value {
        self.storage().encode_summary()
    }
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

impl Encode for AnyArray {
    fn encode_with(&self, codec: &Codec) -> Value {
        with_array!(self, a => a.encode_with(codec))
    }

    fn encode_summary(&self) -> Value {
        with_array!(self, a => a.encode_summary())
    }
}

impl Encode for Dictionary {
    fn encode_with(&self, codec: &Codec) -> Value {
        if self.is_summary() {
            return self.encode_summary();
        }
        let items: Map<String, Value> = self
            .iter()
            .map(|(key, child)| (key.to_string(), child.encode_with(codec)))
            .collect();

        let mut object = header("dictionary", self.meta());
        object.insert("items".into(), Value::Object(items));
        Value::Object(object)
    }

    fn encode_summary(&self) -> Value {
        Value::Object(header("dictionary", self.meta()))
    }
}

impl Encode for Attribute {
    fn encode_with(&self, codec: &Codec) -> Value {
        match self {
            Attribute::Null(n) => n.encode_with(codec),
            Attribute::Atomic(a) => a.encode_with(codec),
            Attribute::Array(a) => a.encode_with(codec),
            Attribute::Dictionary(d) => d.encode_with(codec),
        }
    }

    fn encode_summary(&self) -> Value {
        match self {
            Attribute::Null(n) => n.encode_summary(),
            Attribute::Atomic(a) => a.encode_summary(),
            Attribute::Array(a) => a.encode_summary(),
            Attribute::Dictionary(d) => d.encode_summary(),
        }
    }
}
