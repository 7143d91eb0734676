//! JSON scalar conversion per element type
//!
//! | Element | JSON | Notes |
//! |---------|------|-------|
//! | integers | number | range-checked on decode, never truncated |
//! | floats | number | NaN and ±Inf use the `$f64` wrapper; `null` also decodes to NaN |
//! | bool | `true`/`false` | |
//! | string | string | |
//!
//! JSON has no literal for non-finite floats, so they travel wrapped:
//!
//! ```text
//! {"$f64": "NaN"}   {"$f64": "+Inf"}   {"$f64": "-Inf"}
//! ```

use serde_json::{Map, Number, Value};

use sal_core::{Element, Tag};

use super::error::DecodeErrorKind;

/// An element type with a JSON scalar representation.
pub trait WireElement: Element {
    /// JSON scalar for this value
    fn to_json(&self) -> Value;

    /// Parse a JSON scalar as this element type
    fn from_json(value: &Value) -> Result<Self, DecodeErrorKind>;
}

fn invalid(value: &Value, element: Tag) -> DecodeErrorKind {
    DecodeErrorKind::InvalidValue {
        value: value.to_string(),
        element: element.wire_name(),
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl WireElement for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }

                fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
                    value
                        .as_i64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| invalid(value, <$ty as Element>::TAG))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl WireElement for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }

                fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
                    value
                        .as_u64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| invalid(value, <$ty as Element>::TAG))
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

/// Wrapper key for floats without a JSON number representation
pub const SPECIAL_FLOAT_KEY: &str = "$f64";

fn float_to_json(value: f64) -> Value {
    if let Some(number) = Number::from_f64(value) {
        return Value::Number(number);
    }
    let text = if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "+Inf"
    } else {
        "-Inf"
    };
    let mut wrapper = Map::new();
    wrapper.insert(SPECIAL_FLOAT_KEY.into(), Value::from(text));
    Value::Object(wrapper)
}

fn float_from_json(value: &Value, element: Tag) -> Result<f64, DecodeErrorKind> {
    match value {
        Value::Null => Ok(f64::NAN),
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(value, element)),
        Value::Object(object) if object.len() == 1 => {
            match object.get(SPECIAL_FLOAT_KEY).and_then(Value::as_str) {
                Some("NaN") => Ok(f64::NAN),
                Some("+Inf") => Ok(f64::INFINITY),
                Some("-Inf") => Ok(f64::NEG_INFINITY),
                _ => Err(invalid(value, element)),
            }
        }
        _ => Err(invalid(value, element)),
    }
}

impl WireElement for f64 {
    fn to_json(&self) -> Value {
        float_to_json(*self)
    }

    fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
        float_from_json(value, Tag::Float64)
    }
}

impl WireElement for f32 {
    fn to_json(&self) -> Value {
        float_to_json(f64::from(*self))
    }

    fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
        float_from_json(value, Tag::Float32).map(|v| v as f32)
    }
}

impl WireElement for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
        value.as_bool().ok_or_else(|| invalid(value, Tag::Bool))
    }
}

impl WireElement for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Result<Self, DecodeErrorKind> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid(value, Tag::String))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_range_checked() {
        assert_eq!(i8::from_json(&json!(-128)), Ok(-128));
        assert!(i8::from_json(&json!(128)).is_err());
        assert!(u16::from_json(&json!(-1)).is_err());
        assert_eq!(u64::from_json(&json!(u64::MAX)), Ok(u64::MAX));
        assert!(i64::from_json(&json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_integer_rejects_fraction_and_text() {
        assert!(i32::from_json(&json!(1.5)).is_err());
        assert!(i32::from_json(&json!("1")).is_err());
        let err = u8::from_json(&json!(true)).unwrap_err();
        assert_eq!(
            err,
            DecodeErrorKind::InvalidValue {
                value: "true".into(),
                element: "uint8"
            }
        );
    }

    #[test]
    fn test_float_accepts_integers() {
        assert_eq!(f64::from_json(&json!(3)), Ok(3.0));
        assert_eq!(f32::from_json(&json!(0.5)), Ok(0.5));
    }

    #[test]
    fn test_non_finite_floats_are_wrapped() {
        assert_eq!(f64::NAN.to_json(), json!({"$f64": "NaN"}));
        assert_eq!(f64::INFINITY.to_json(), json!({"$f64": "+Inf"}));
        assert_eq!(f32::NEG_INFINITY.to_json(), json!({"$f64": "-Inf"}));

        assert_eq!(f64::from_json(&json!({"$f64": "+Inf"})), Ok(f64::INFINITY));
        assert_eq!(f32::from_json(&json!({"$f64": "-Inf"})), Ok(f32::NEG_INFINITY));
        assert!(f64::from_json(&json!({"$f64": "NaN"})).unwrap().is_nan());
    }

    #[test]
    fn test_null_decodes_to_nan() {
        assert!(f64::from_json(&Value::Null).unwrap().is_nan());
        assert!(f32::from_json(&Value::Null).unwrap().is_nan());
    }

    #[test]
    fn test_malformed_float_wrapper() {
        assert!(f64::from_json(&json!({"$f64": "Inf"})).is_err());
        assert!(f64::from_json(&json!({"$f64": "NaN", "extra": 1})).is_err());
        assert!(f32::from_json(&json!({"value": 1.0})).is_err());
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        let back = f64::from_json(&(-0.0f64).to_json()).unwrap();
        assert!(back == 0.0 && back.is_sign_negative());
    }

    #[test]
    fn test_bool_and_string() {
        assert_eq!(bool::from_json(&json!(false)), Ok(false));
        assert!(bool::from_json(&json!(0)).is_err());
        assert_eq!(String::from_json(&json!("ip")), Ok("ip".to_string()));
        assert_eq!("x".to_string().to_json(), json!("x"));
    }
}
