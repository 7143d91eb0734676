//! JSON wire encoding for SAL attributes
//!
//! - [`Encode`] turns an attribute into a `serde_json::Value` tree, full or summary
//! - [`Decode`] turns a tree back into an attribute; `Attribute::decode` is the
//!   dispatcher that routes on the `type` key
//! - [`Codec`] carries the settings shared by both directions

mod array;
mod config;
mod decode;
mod element;
mod encode;
mod error;

pub use array::{ENCODING_BASE64, ENCODING_LIST};
pub use config::{Base64Alphabet, Codec, CodecBuilder};
pub use decode::{decode_as, decode_as_with, decode_str, decode_str_with, Decode};
pub use element::{WireElement, SPECIAL_FLOAT_KEY};
pub use encode::Encode;
pub use error::{DecodeError, DecodeErrorKind};

#[cfg(test)]
mod roundtrip_tests {
    use super::*;
    use proptest::prelude::*;
    use sal_core::{Array, Atomic, Attribute, BoolArray, Dictionary, Null};

    fn round_trip<T: Encode + Decode>(value: &T) -> T {
        T::decode(&value.encode()).unwrap()
    }

    #[test]
    fn test_round_trip_float64_array() {
        let original = Array::from_vec(&[3], vec![1.0f64, 2.0, 3.0]).unwrap();
        let decoded = round_trip(&original);
        assert_eq!(decoded.shape(), &[3]);
        assert_eq!(decoded.data(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_round_trip_string_matrix() {
        let original = Array::from_vec(
            &[2, 2],
            vec!["a".to_string(), "b".into(), "c".into(), "d".into()],
        )
        .unwrap();
        let decoded = round_trip(&original);
        assert_eq!(decoded.at(&[1, 0]).unwrap(), "c");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_round_trip_zero_dimensional() {
        let mut original = Array::<u32>::new(&[]);
        original[0] = 77;
        let decoded = round_trip(&original);
        assert_eq!(decoded.dimension(), 0);
        assert_eq!(decoded.size(), 1);
        assert_eq!(decoded[0], 77);

        let strings = Array::from_vec(&[], vec!["scalar".to_string()]).unwrap();
        assert_eq!(round_trip(&strings), strings);
    }

    #[test]
    fn test_round_trip_bool_array() {
        let original = BoolArray::from_bools(&[2, 2], vec![true, false, false, true]).unwrap();
        assert_eq!(round_trip(&original), original);
    }

    #[test]
    fn test_round_trip_nested_dictionary() {
        let mut inner = Dictionary::new();
        inner.set("units", "A");
        inner.set("data", Array::from_vec(&[2], vec![1.5f32, -0.5]).unwrap());

        let mut outer = Dictionary::new();
        outer.set("ipla", inner);
        outer.set("shot", 99357u32);
        outer.meta_mut().set_description(Some("pulse".into()));

        let decoded = round_trip(&outer);
        assert_eq!(decoded, outer);
    }

    #[test]
    fn test_dictionary_null_child_is_dropped() {
        let mut dict = Dictionary::new();
        dict.set("kept", 1i8);
        dict.set("gone", Null::new());

        let decoded = round_trip(&dict);
        assert!(decoded.has("kept"));
        assert!(!decoded.has("gone"));
    }

    #[test]
    fn test_attribute_round_trip() {
        let original = Attribute::from(Array::from_vec(&[2, 3], (0..6).collect::<Vec<i64>>()).unwrap());
        assert_eq!(round_trip(&original), original);
    }

    proptest! {
        #[test]
        fn prop_round_trip_i64(v in any::<i64>()) {
            prop_assert_eq!(*round_trip(&Atomic::new(v)).value(), v);
        }

        #[test]
        fn prop_round_trip_u64(v in any::<u64>()) {
            prop_assert_eq!(*round_trip(&Atomic::new(v)).value(), v);
        }

        #[test]
        fn prop_round_trip_i8(v in any::<i8>()) {
            prop_assert_eq!(*round_trip(&Atomic::new(v)).value(), v);
        }

        #[test]
        fn prop_round_trip_finite_f64(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            prop_assert_eq!(*round_trip(&Atomic::new(v)).value(), v);
        }

        #[test]
        fn prop_round_trip_string(v in ".*") {
            prop_assert_eq!(round_trip(&Atomic::new(v.clone())).into_inner(), v);
        }

        #[test]
        fn prop_base64_round_trip_any_shape(
            shape in proptest::collection::vec(0usize..4, 0..4),
            seed in any::<u16>(),
        ) {
            let count: usize = shape.iter().product();
            let data: Vec<u16> = (0..count).map(|i| seed.wrapping_add(i as u16)).collect();
            let original = Array::from_vec(&shape, data).unwrap();
            prop_assert_eq!(round_trip(&original), original);
        }
    }
}
