//! JSON decoding for SAL attributes
//!
//! [`Attribute::decode`] is the dispatcher: it reads the `type` key of a wire
//! object and hands the object to the matching variant decoder. Arrays are
//! routed a second time on their element type.
//!
//! Payload keys are not consistent across producers, so both spellings are
//! accepted:
//!
//! | Node | Payload key | Fallback |
//! |------|-------------|----------|
//! | array | `value` | `data` |
//! | dictionary | `items` | `value` |
//!
//! A node carrying neither decodes as a summary.

use serde_json::{Map, Value};
use tracing::debug;

use sal_core::{
    AnyArray, Array, Atomic, Attribute, AttributeCast, BoolArray, Dictionary, Meta, Tag,
};

use super::array::{
    check_payload_length, decode_base64, fill_buffer, parse_shape, payload_size, unnest,
    ENCODING_BASE64, ENCODING_LIST,
};
use super::config::Codec;
use super::element::WireElement;
use super::error::{with_context, DecodeError, DecodeErrorKind};

/// Wire decoding of an attribute.
pub trait Decode: Sized {
    /// Decode using `codec`
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError>;

    /// Decode with the default codec
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Self::decode_with(value, &Codec::default())
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, DecodeErrorKind> {
    value.as_object().ok_or(DecodeErrorKind::NotAnAttribute)
}

fn type_name(object: &Map<String, Value>) -> Result<&str, DecodeErrorKind> {
    object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeErrorKind::NotAnAttribute)
}

fn expect_type<'a>(
    value: &'a Value,
    expected: &str,
) -> Result<&'a Map<String, Value>, DecodeErrorKind> {
    let object = as_object(value)?;
    let actual = type_name(object)?;
    if actual != expected {
        return Err(DecodeErrorKind::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(object)
}

fn required<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Value, DecodeErrorKind> {
    object.get(key).ok_or(DecodeErrorKind::MissingKey { key })
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, DecodeErrorKind> {
    required(object, key)?
        .as_str()
        .ok_or(DecodeErrorKind::InvalidField {
            key,
            expected: "a string",
        })
}

fn read_description(object: &Map<String, Value>, meta: &mut Meta) -> Result<(), DecodeErrorKind> {
    match object.get("description") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(text)) => {
            meta.set_description(Some(text.clone()));
            Ok(())
        }
        Some(_) => Err(DecodeErrorKind::InvalidField {
            key: "description",
            expected: "a string",
        }),
    }
}

/// Look up a payload under its primary key, then its fallback
fn payload<'a>(
    object: &'a Map<String, Value>,
    primary: &'static str,
    fallback: &'static str,
) -> Option<(&'static str, &'a Value)> {
    if let Some(value) = object.get(primary) {
        return Some((primary, value));
    }
    let value = object.get(fallback)?;
    debug!(primary, fallback, "payload found under fallback key");
    Some((fallback, value))
}

impl<T: WireElement> Decode for Atomic<T> {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        with_context(codec, "decode_atomic", value, || {
            let object = expect_type(value, T::TAG.wire_name())?;
            let mut atomic = Atomic::new(T::from_json(required(object, "value")?)?);
            read_description(object, atomic.meta_mut())?;
            Ok(atomic)
        })
    }
}

/// Element type names an `Array<T>` accepts on the wire
fn accepts_element<T: WireElement>(name: &str) -> bool {
    name == T::TAG.wire_name() || (T::TAG == Tag::UInt8 && name == Tag::Bool.wire_name())
}

fn decode_array_body<T: WireElement>(
    value: &Value,
    codec: &Codec,
    accepts: fn(&str) -> bool,
) -> Result<Array<T>, DecodeErrorKind> {
    let object = expect_type(value, "array")?;

    let Some((key, definition)) = payload(object, "value", "data") else {
        debug!("array without payload decoded as summary");
        if let Some(element) = object.get("element_type").and_then(Value::as_str) {
            if !accepts(element) {
                return Err(DecodeErrorKind::TypeMismatch {
                    expected: T::TAG.wire_name().to_string(),
                    actual: element.to_string(),
                });
            }
        }
        let shape = parse_shape(required(object, "shape")?)?;
        let mut array = Array::new_summary(&shape);
        read_description(object, array.meta_mut())?;
        return Ok(array);
    };

    let definition = definition.as_object().ok_or(DecodeErrorKind::InvalidField {
        key,
        expected: "an object",
    })?;
    let element = required_str(definition, "type")?;
    if !accepts(element) {
        return Err(DecodeErrorKind::TypeMismatch {
            expected: T::TAG.wire_name().to_string(),
            actual: element.to_string(),
        });
    }
    let encoding = required_str(definition, "encoding")?;
    let shape = parse_shape(required(definition, "shape")?)?;
    let data = required(definition, "data")?;

    let mut array = match encoding {
        ENCODING_BASE64 => {
            let text = data.as_str().ok_or(DecodeErrorKind::InvalidField {
                key: "data",
                expected: "a base64 string",
            })?;
            let unsupported = || DecodeErrorKind::UnsupportedEncoding {
                encoding: encoding.to_string(),
                element: T::TAG.wire_name(),
            };
            let width = T::TAG.element_width().ok_or_else(unsupported)?;
            let bytes = decode_base64(text, codec)?;
            check_payload_length(payload_size(&shape, width)?, bytes.len(), codec)?;

            let mut array = Array::<T>::try_new(&shape).map_err(|err| {
                DecodeErrorKind::InvalidShape {
                    reason: err.to_string(),
                }
            })?;
            fill_buffer(array.as_bytes_mut().map_err(|_| unsupported())?, &bytes);
            array
        }
        ENCODING_LIST => {
            let elements = unnest::<T>(data, &shape)?;
            Array::from_vec(&shape, elements).map_err(|err| DecodeErrorKind::NestedList {
                depth: 0,
                reason: err.to_string(),
            })?
        }
        other => {
            return Err(DecodeErrorKind::UnsupportedEncoding {
                encoding: other.to_string(),
                element: T::TAG.wire_name(),
            })
        }
    };
    read_description(object, array.meta_mut())?;
    Ok(array)
}

impl<T: WireElement> Decode for Array<T> {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        with_context(codec, "decode_array", value, || {
            decode_array_body::<T>(value, codec, accepts_element::<T>)
        })
    }
}

impl Decode for BoolArray {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        with_context(codec, "decode_array", value, || {
            decode_array_body::<u8>(value, codec, |name| name == Tag::Bool.wire_name())
                .map(BoolArray::from_storage)
        })
    }
}

impl Decode for AnyArray {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        let element = with_context(codec, "decode_array", value, || {
            let object = expect_type(value, "array")?;
            let name = match payload(object, "value", "data") {
                Some((_, definition)) => definition
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or(DecodeErrorKind::MissingKey { key: "type" })?,
                None => object
                    .get("element_type")
                    .and_then(Value::as_str)
                    .unwrap_or(Tag::Float64.wire_name()),
            };
            Tag::from_wire_name(name)
                .filter(|tag| tag.is_element())
                .ok_or_else(|| DecodeErrorKind::UnknownElementType {
                    name: name.to_string(),
                })
        })?;
        debug!(element = element.wire_name(), "dispatching array");

        Ok(match element {
            Tag::Int8 => AnyArray::Int8(Array::decode_with(value, codec)?),
            Tag::Int16 => AnyArray::Int16(Array::decode_with(value, codec)?),
            Tag::Int32 => AnyArray::Int32(Array::decode_with(value, codec)?),
            Tag::Int64 => AnyArray::Int64(Array::decode_with(value, codec)?),
            Tag::UInt8 => AnyArray::UInt8(Array::decode_with(value, codec)?),
            Tag::UInt16 => AnyArray::UInt16(Array::decode_with(value, codec)?),
            Tag::UInt32 => AnyArray::UInt32(Array::decode_with(value, codec)?),
            Tag::UInt64 => AnyArray::UInt64(Array::decode_with(value, codec)?),
            Tag::Float32 => AnyArray::Float32(Array::decode_with(value, codec)?),
            Tag::Float64 => AnyArray::Float64(Array::decode_with(value, codec)?),
            Tag::Bool => AnyArray::Bool(BoolArray::decode_with(value, codec)?),
            Tag::String => AnyArray::String(Array::decode_with(value, codec)?),
            Tag::Null | Tag::Array | Tag::Dictionary => {
                return Err(DecodeError::new(
                    codec,
                    "decode_array",
                    DecodeErrorKind::UnknownElementType {
                        name: element.wire_name().to_string(),
                    },
                    value,
                ))
            }
        })
    }
}

impl Decode for Dictionary {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        with_context(codec, "decode_dictionary", value, || {
            let object = expect_type(value, "dictionary")?;

            let Some((key, items)) = payload(object, "items", "value") else {
                debug!("dictionary without items decoded as summary");
                let mut dict = Dictionary::new_summary();
                read_description(object, dict.meta_mut())?;
                return Ok(dict);
            };
            let items = items.as_object().ok_or(DecodeErrorKind::InvalidField {
                key,
                expected: "an object",
            })?;

            let mut dict = Dictionary::new();
            for (key, child) in items {
                if child.is_null() || is_null_attribute(child) {
                    debug!(key = key.as_str(), "dropping null dictionary entry");
                    continue;
                }
                if !child.is_object() {
                    return Err(DecodeErrorKind::InvalidEntry { key: key.clone() });
                }
                let attr = Attribute::decode_with(child, codec).map_err(|err| {
                    DecodeErrorKind::Entry {
                        key: key.clone(),
                        source: Box::new(err),
                    }
                })?;
                dict.set(key.as_str(), attr);
            }
            read_description(object, dict.meta_mut())?;
            Ok(dict)
        })
    }
}

fn is_null_attribute(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(Tag::Null.wire_name())
}

impl Decode for Attribute {
    fn decode_with(value: &Value, codec: &Codec) -> Result<Self, DecodeError> {
        let tag = with_context(codec, "decode", value, || {
            let name = type_name(as_object(value)?)?;
            Tag::from_wire_name(name).ok_or_else(|| DecodeErrorKind::UnknownType {
                name: name.to_string(),
            })
        })?;
        debug!(attribute = tag.wire_name(), "dispatching attribute");

        Ok(match tag {
            Tag::Dictionary => Dictionary::decode_with(value, codec)?.into(),
            Tag::Array => AnyArray::decode_with(value, codec)?.into(),
            Tag::Int8 => Atomic::<i8>::decode_with(value, codec)?.into(),
            Tag::Int16 => Atomic::<i16>::decode_with(value, codec)?.into(),
            Tag::Int32 => Atomic::<i32>::decode_with(value, codec)?.into(),
            Tag::Int64 => Atomic::<i64>::decode_with(value, codec)?.into(),
            Tag::UInt8 => Atomic::<u8>::decode_with(value, codec)?.into(),
            Tag::UInt16 => Atomic::<u16>::decode_with(value, codec)?.into(),
            Tag::UInt32 => Atomic::<u32>::decode_with(value, codec)?.into(),
            Tag::UInt64 => Atomic::<u64>::decode_with(value, codec)?.into(),
            Tag::Float32 => Atomic::<f32>::decode_with(value, codec)?.into(),
            Tag::Float64 => Atomic::<f64>::decode_with(value, codec)?.into(),
            Tag::Bool => Atomic::<bool>::decode_with(value, codec)?.into(),
            Tag::String => Atomic::<String>::decode_with(value, codec)?.into(),
            Tag::Null => {
                return Err(DecodeError::new(
                    codec,
                    "decode",
                    DecodeErrorKind::Undecodable {
                        name: tag.wire_name().to_string(),
                    },
                    value,
                ))
            }
        })
    }
}

/// Decode any attribute and convert it to a concrete variant.
///
/// Fails with [`DecodeErrorKind::TypeMismatch`] when the wire object decodes
/// to a different variant than `T`.
pub fn decode_as<T: AttributeCast>(value: &Value) -> Result<T, DecodeError> {
    decode_as_with(value, &Codec::default())
}

/// [`decode_as`] with an explicit codec
pub fn decode_as_with<T: AttributeCast>(value: &Value, codec: &Codec) -> Result<T, DecodeError> {
    let attr = Attribute::decode_with(value, codec)?;
    T::cast(attr).map_err(|attr| {
        DecodeError::new(
            codec,
            "decode_as",
            DecodeErrorKind::TypeMismatch {
                expected: T::EXPECTED.to_string(),
                actual: attr.type_name().to_string(),
            },
            value,
        )
    })
}

/// Parse JSON text and decode the attribute it holds
pub fn decode_str(text: &str) -> Result<Attribute, DecodeError> {
    decode_str_with(text, &Codec::default())
}

/// [`decode_str`] with an explicit codec
pub fn decode_str_with(text: &str, codec: &Codec) -> Result<Attribute, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| DecodeError::invalid_json(&err, text))?;
    Attribute::decode_with(&value, codec)
}
