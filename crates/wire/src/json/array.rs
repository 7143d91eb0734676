//! Array payload codecs
//!
//! Two payload encodings exist for the `data` field of an array:
//!
//! - `base64`: the raw element buffer in native layout, row-major, no padding
//!   between elements. Used for every element type with contiguous storage.
//! - `list`: JSON arrays nested once per dimension, leaves holding the
//!   elements of the innermost dimension. Used for strings; accepted on decode
//!   for every element type. A zero-dimensional array nests zero times, so its
//!   payload is the bare element.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use tracing::{debug, warn};

use sal_core::{checked_element_count, element_count, Array};

use super::config::{Base64Alphabet, Codec};
use super::element::WireElement;
use super::error::DecodeErrorKind;

/// `encoding` value for binary payloads
pub const ENCODING_BASE64: &str = "base64";
/// `encoding` value for nested-list payloads
pub const ENCODING_LIST: &str = "list";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Payload encoding and `data` value for an array
pub(crate) fn encode_payload<T: WireElement>(array: &Array<T>, codec: &Codec) -> (&'static str, Value) {
    match array.as_bytes() {
        Ok(bytes) => {
            let text = codec.alphabet().engine().encode(bytes);
            (ENCODING_BASE64, Value::String(text))
        }
        Err(_) => (ENCODING_LIST, nest(array.shape(), array.data())),
    }
}

fn nest<T: WireElement>(shape: &[usize], data: &[T]) -> Value {
    match shape.split_first() {
        None => data.first().map_or(Value::Null, WireElement::to_json),
        Some((&extent, rest)) => {
            let chunk = element_count(rest);
            Value::Array(
                (0..extent)
                    .map(|i| nest(rest, &data[i * chunk..(i + 1) * chunk]))
                    .collect(),
            )
        }
    }
}

/// Parse a nested-list payload mirroring `shape` into a row-major buffer
pub(crate) fn unnest<T: WireElement>(
    value: &Value,
    shape: &[usize],
) -> Result<Vec<T>, DecodeErrorKind> {
    let mut out = Vec::new();
    unnest_into(value, shape, 0, &mut out)?;
    Ok(out)
}

fn unnest_into<T: WireElement>(
    value: &Value,
    shape: &[usize],
    depth: usize,
    out: &mut Vec<T>,
) -> Result<(), DecodeErrorKind> {
    let Some((&extent, rest)) = shape.split_first() else {
        out.push(leaf(value)?);
        return Ok(());
    };
    let Value::Array(items) = value else {
        return Err(DecodeErrorKind::NestedList {
            depth,
            reason: format!("expected a list of {extent} items, found {value}"),
        });
    };
    if items.len() != extent {
        return Err(DecodeErrorKind::NestedList {
            depth,
            reason: format!("expected {extent} items, found {}", items.len()),
        });
    }
    for item in items {
        unnest_into(item, rest, depth + 1, out)?;
    }
    Ok(())
}

/// Boolean leaves are accepted for byte elements so that `bool` arrays sent
/// as lists decode into byte storage.
fn leaf<T: WireElement>(value: &Value) -> Result<T, DecodeErrorKind> {
    match value {
        Value::Bool(b) if T::TAG == sal_core::Tag::UInt8 => T::from_json(&Value::from(u8::from(*b))),
        _ => T::from_json(value),
    }
}

/// Decode base64 text in either alphabet, padded or not, ignoring whitespace
pub(crate) fn decode_base64(text: &str, codec: &Codec) -> Result<Vec<u8>, DecodeErrorKind> {
    let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let (preferred, fallback) = match codec.alphabet() {
        Base64Alphabet::UrlSafe => (&URL_SAFE_LENIENT, &STANDARD_LENIENT),
        Base64Alphabet::Standard => (&STANDARD_LENIENT, &URL_SAFE_LENIENT),
    };
    match preferred.decode(&cleaned) {
        Ok(bytes) => Ok(bytes),
        Err(first) => match fallback.decode(&cleaned) {
            Ok(bytes) => {
                warn!(
                    alphabet = ?codec.alphabet(),
                    "base64 payload decoded with the alternate alphabet"
                );
                Ok(bytes)
            }
            Err(_) => Err(DecodeErrorKind::InvalidBase64 {
                reason: first.to_string(),
            }),
        },
    }
}

/// Check a decoded payload length against the byte size implied by the shape.
///
/// Runs before the element buffer is allocated. In lenient mode a mismatch
/// is only logged.
pub(crate) fn check_payload_length(
    expected: usize,
    actual: usize,
    codec: &Codec,
) -> Result<(), DecodeErrorKind> {
    if expected == actual {
        return Ok(());
    }
    if codec.strict_payload_length() {
        return Err(DecodeErrorKind::PayloadLength { expected, actual });
    }
    debug!(
        expected,
        actual, "payload length differs from shape, copying common prefix"
    );
    Ok(())
}

/// Copy decoded payload bytes into an array buffer, zero-filling or
/// truncating to the buffer length
pub(crate) fn fill_buffer(target: &mut [u8], bytes: &[u8]) {
    let n = target.len().min(bytes.len());
    target[..n].copy_from_slice(&bytes[..n]);
}

/// Byte size of a buffer of `count` elements `width` bytes wide
pub(crate) fn payload_size(shape: &[usize], width: usize) -> Result<usize, DecodeErrorKind> {
    checked_element_count(shape)
        .and_then(|count| count.checked_mul(width))
        .ok_or_else(|| DecodeErrorKind::InvalidShape {
            reason: format!("{shape:?} overflows the addressable byte size"),
        })
}

/// Parse a JSON shape list.
///
/// Fails when an extent is not a non-negative integer or when the element
/// count of the shape does not fit in `usize`.
pub(crate) fn parse_shape(value: &Value) -> Result<Vec<usize>, DecodeErrorKind> {
    let Value::Array(items) = value else {
        return Err(DecodeErrorKind::InvalidShape {
            reason: format!("expected a list, found {value}"),
        });
    };
    let shape = items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|extent| usize::try_from(extent).ok())
                .ok_or_else(|| DecodeErrorKind::InvalidShape {
                    reason: format!("extent {item} is not a non-negative integer"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if checked_element_count(&shape).is_none() {
        return Err(DecodeErrorKind::InvalidShape {
            reason: format!("element count of {shape:?} overflows"),
        });
    }
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base64_native_layout() {
        let arr = Array::from_vec(&[2], vec![1i16, -2]).unwrap();
        let (encoding, data) = encode_payload(&arr, &Codec::default());
        assert_eq!(encoding, ENCODING_BASE64);

        let bytes = decode_base64(data.as_str().unwrap(), &Codec::default()).unwrap();
        let mut expected = 1i16.to_ne_bytes().to_vec();
        expected.extend_from_slice(&(-2i16).to_ne_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_string_arrays_nest() {
        let arr = Array::from_vec(
            &[2, 2],
            vec!["a".to_string(), "b".into(), "c".into(), "d".into()],
        )
        .unwrap();
        let (encoding, data) = encode_payload(&arr, &Codec::default());
        assert_eq!(encoding, ENCODING_LIST);
        assert_eq!(data, json!([["a", "b"], ["c", "d"]]));
    }

    #[test]
    fn test_zero_dimensional_nest_is_bare() {
        let arr = Array::from_vec(&[], vec!["only".to_string()]).unwrap();
        assert_eq!(encode_payload(&arr, &Codec::default()).1, json!("only"));
        assert_eq!(unnest::<String>(&json!("only"), &[]).unwrap(), vec!["only"]);
    }

    #[test]
    fn test_zero_extent_nest() {
        let arr = Array::<String>::new(&[2, 0]);
        assert_eq!(encode_payload(&arr, &Codec::default()).1, json!([[], []]));
        assert!(unnest::<String>(&json!([[], []]), &[2, 0]).unwrap().is_empty());
    }

    #[test]
    fn test_unnest_rejects_wrong_depth_and_length() {
        let err = unnest::<String>(&json!(["a", "b"]), &[2, 1]).unwrap_err();
        assert!(matches!(err, DecodeErrorKind::NestedList { depth: 1, .. }));

        let err = unnest::<i32>(&json!([1, 2, 3]), &[2]).unwrap_err();
        assert!(matches!(err, DecodeErrorKind::NestedList { depth: 0, .. }));
    }

    #[test]
    fn test_unnest_numbers_and_bool_bytes() {
        assert_eq!(unnest::<f32>(&json!([[1, 2], [3, 4.5]]), &[2, 2]).unwrap(), vec![1.0, 2.0, 3.0, 4.5]);
        assert_eq!(unnest::<u8>(&json!([true, false]), &[2]).unwrap(), vec![1, 0]);
        assert!(unnest::<i8>(&json!([true]), &[1]).is_err());
    }

    #[test]
    fn test_decode_base64_either_alphabet() {
        let bytes = [0xfbu8, 0xff, 0xfe];
        let url = base64::engine::general_purpose::URL_SAFE.encode(bytes);
        let std = base64::engine::general_purpose::STANDARD.encode(bytes);
        assert_ne!(url, std);

        let codec = Codec::default();
        assert_eq!(decode_base64(&url, &codec).unwrap(), bytes);
        assert_eq!(decode_base64(&std, &codec).unwrap(), bytes);
    }

    #[test]
    fn test_decode_base64_lenient_text() {
        let codec = Codec::default();
        assert_eq!(decode_base64("AAEC\nAw==", &codec).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(decode_base64("AAECAw", &codec).unwrap(), vec![0, 1, 2, 3]);
        assert!(matches!(
            decode_base64("not base64!", &codec),
            Err(DecodeErrorKind::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_payload_length_strict_and_lenient() {
        assert_eq!(
            check_payload_length(4, 2, &Codec::default()),
            Err(DecodeErrorKind::PayloadLength {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(check_payload_length(4, 4, &Codec::default()), Ok(()));

        let lenient = Codec::builder().strict_payload_length(false).build();
        assert_eq!(check_payload_length(4, 6, &lenient), Ok(()));
    }

    #[test]
    fn test_fill_buffer_copies_common_prefix() {
        let mut target = [0u8; 4];
        fill_buffer(&mut target, &[1, 2]);
        assert_eq!(target, [1, 2, 0, 0]);
        fill_buffer(&mut target, &[9, 9, 9, 9, 9, 9]);
        assert_eq!(target, [9, 9, 9, 9]);
    }

    #[test]
    fn test_payload_size_overflow() {
        assert_eq!(payload_size(&[2, 3], 8), Ok(48));
        assert!(matches!(
            payload_size(&[usize::MAX / 2, 1], 8),
            Err(DecodeErrorKind::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_parse_shape() {
        assert_eq!(parse_shape(&json!([3, 4])).unwrap(), vec![3, 4]);
        assert_eq!(parse_shape(&json!([])).unwrap(), Vec::<usize>::new());
        assert!(parse_shape(&json!([-1])).is_err());
        assert!(parse_shape(&json!([1.5])).is_err());
        assert!(parse_shape(&json!("3")).is_err());
    }

    #[test]
    fn test_parse_shape_rejects_overflowing_count() {
        let err = parse_shape(&json!([2, 1u64 << 32, 1u64 << 32])).unwrap_err();
        assert!(matches!(err, DecodeErrorKind::InvalidShape { .. }));
        assert!(parse_shape(&json!([0, 1u64 << 40, 1u64 << 40])).is_ok());
    }
}
