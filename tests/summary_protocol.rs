//! Summary Protocol Tests
//!
//! Summaries let a client browse a tree without pulling array data or
//! dictionary contents. These tests pin down what each summary keeps and
//! how a decoded summary behaves.

use sal_data::prelude::*;

// ============================================================================
// Summary Encoding
// ============================================================================

mod encoding {
    use super::*;

    #[test]
    fn test_atomic_summary_keeps_value() {
        let atomic = Atomic::new(12.5f32);
        assert_eq!(atomic.encode_summary(), json!({"type": "float32", "value": 12.5}));
        assert_eq!(atomic.encode_summary(), atomic.encode());
    }

    #[test]
    fn test_array_summary_has_shape_and_no_payload() {
        let array = Float64Array::new(&[128, 64]);
        let summary = array.encode_summary();
        assert_eq!(summary["type"], "array");
        assert_eq!(summary["shape"], json!([128, 64]));
        assert_eq!(summary["element_type"], "float64");
        assert!(summary.get("value").is_none());
        assert!(summary.get("data").is_none());
    }

    #[test]
    fn test_dictionary_summary_has_no_items() {
        let mut dict = Dictionary::new();
        dict.set("ip", Float32Array::new(&[4096]));
        let summary = dict.encode_summary();
        assert_eq!(summary, json!({"type": "dictionary"}));
    }

    #[test]
    fn test_summary_keeps_description() {
        let mut array = Int16Array::new(&[8]);
        array
            .meta_mut()
            .set_description(Some("raw digitiser counts".into()));
        let summary = array.encode_summary();
        assert_eq!(summary["description"], "raw digitiser counts");
    }

    #[test]
    fn test_summary_text_is_compact() {
        let text = sal_data::summary_string(&Dictionary::new());
        assert_eq!(text, r#"{"type":"dictionary"}"#);
    }

    #[test]
    fn test_attribute_summary_follows_variant() {
        let attr = Attribute::from(BoolArray::new(&[3]));
        let summary = attr.encode_summary();
        assert_eq!(summary["element_type"], "bool");
        assert_eq!(summary["shape"], json!([3]));
    }
}

// ============================================================================
// Summary Decoding
// ============================================================================

mod decoding {
    use super::*;

    #[test]
    fn test_decoded_array_summary() {
        let array = Float64Array::new(&[10, 20]);
        let decoded = Attribute::decode(&array.encode_summary()).unwrap();
        assert!(decoded.is_summary());

        let decoded = decoded.downcast_ref::<Float64Array>().unwrap();
        assert_eq!(decoded.shape(), &[10, 20]);
        assert_eq!(decoded.size(), 0);
    }

    #[test]
    fn test_element_type_selects_variant() {
        let decoded =
            Attribute::decode(&json!({"type": "array", "shape": [5], "element_type": "uint32"}))
                .unwrap();
        assert!(decoded.is_summary());
        assert!(decoded.downcast_ref::<UInt32Array>().is_some());
    }

    #[test]
    fn test_missing_element_type_defaults_to_float64() {
        let decoded = Attribute::decode(&json!({"type": "array", "shape": [2, 2]})).unwrap();
        assert!(decoded.is_summary());
        assert!(decoded.downcast_ref::<Float64Array>().is_some());
    }

    #[test]
    fn test_summary_without_shape_is_rejected() {
        let err = Attribute::decode(&json!({"type": "array"})).unwrap_err();
        assert!(matches!(
            err.kind(),
            sal_data::DecodeErrorKind::MissingKey { key: "shape" }
        ));
    }

    #[test]
    fn test_decoded_dictionary_summary() {
        let decoded = Attribute::decode(&json!({"type": "dictionary"})).unwrap();
        assert!(decoded.is_summary());
        let dict = decoded.downcast_ref::<Dictionary>().unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn test_decoded_atomic_is_never_summary() {
        let decoded = Attribute::decode(&Atomic::new(3u8).encode_summary()).unwrap();
        assert!(!decoded.is_summary());
    }

    #[test]
    fn test_encoding_a_summary_yields_summary() {
        let summary = Int32Array::new_summary(&[7]);
        let wire = summary.encode();
        assert_eq!(wire, summary.encode_summary());
        assert!(wire.get("value").is_none());

        let dict = Dictionary::new_summary();
        assert_eq!(dict.encode(), json!({"type": "dictionary"}));
    }

    #[test]
    fn test_summary_round_trip_is_stable() {
        let original = StringArray::new(&[3]);
        let first = Attribute::decode(&original.encode_summary()).unwrap();
        let second = Attribute::decode(&first.encode()).unwrap();
        assert_eq!(first, second);
        assert!(second.is_summary());
    }
}
