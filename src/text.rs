//! Text-level entry points for a transport.
//!
//! A transport moves JSON text; these helpers sit between that text and the
//! attribute tree so callers need neither `serde_json` nor the codec traits.

use sal_core::{Attribute, AttributeCast};
use sal_wire::{decode_str_with, Codec, Encode};
use tracing::debug;

use crate::error::{Error, Result};

/// Parse JSON text holding one attribute.
pub fn from_json_str(text: &str) -> Result<Attribute> {
    from_json_str_with(text, &Codec::default())
}

/// [`from_json_str`] with an explicit codec.
pub fn from_json_str_with(text: &str, codec: &Codec) -> Result<Attribute> {
    let attr = decode_str_with(text, codec)?;
    debug!(attribute = attr.type_name(), bytes = text.len(), "decoded attribute");
    Ok(attr)
}

/// Parse JSON text holding one attribute of a known variant.
///
/// ```
/// use sal_data::{from_json_str_as, Atomic};
///
/// let shot: Atomic<u32> = from_json_str_as(r#"{"type":"uint32","value":87737}"#).unwrap();
/// assert_eq!(*shot.value(), 87737);
/// ```
pub fn from_json_str_as<T: AttributeCast>(text: &str) -> Result<T> {
    let attr = from_json_str(text)?;
    T::cast(attr).map_err(|attr| Error::WrongType {
        expected: T::EXPECTED.to_string(),
        actual: attr.type_name().to_string(),
    })
}

/// Full JSON text of an attribute.
pub fn to_json_string<A: Encode + ?Sized>(attr: &A) -> Result<String> {
    to_json_string_with(attr, &Codec::default())
}

/// [`to_json_string`] with an explicit codec.
pub fn to_json_string_with<A: Encode + ?Sized>(attr: &A, codec: &Codec) -> Result<String> {
    Ok(serde_json::to_string(&attr.encode_with(codec))?)
}

/// Summary JSON text of an attribute; bulk payload is omitted.
pub fn summary_string<A: Encode + ?Sized>(attr: &A) -> String {
    attr.summary()
}
