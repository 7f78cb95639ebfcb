//! Conversions between values and concrete types.
//!
//! - [`extract`]: value to concrete type
//! - [`buffer`]: tagged byte buffer to concrete type, and back
//! - [`change`]: tolerance-based change detection
//! - [`retype`]: in-place conversion to another tag's storage type
//! - [`text`]: number, complex, vector and time text forms

pub mod buffer;
pub mod change;
pub mod extract;
pub mod retype;
pub mod text;

pub use buffer::{encode_tagged, extract_from_bytes, value_from_bytes};
pub use change::{change_detected, ChangeFilter, DetectChange};
pub use extract::{
    extract_bool, extract_char, extract_complex, extract_complex_vector, extract_f32,
    extract_f64, extract_i32, extract_i64, extract_named_point, extract_string, extract_time,
    extract_vector, value_extract, Extract, INVALID_DOUBLE, INVALID_INT,
};
pub use retype::value_convert;

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::codec::{encode_payload, encode_value};
    use crate::model::{Complex, DataType, NamedPoint, Value};
    use proptest::prelude::*;

    fn finite() -> impl Strategy<Value = f64> {
        -1e12f64..1e12
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            finite().prop_map(Value::Double),
            any::<i64>().prop_map(Value::Integer),
            "[a-z0-9 .+-]{0,12}".prop_map(Value::String),
            (finite(), finite()).prop_map(|(re, im)| Value::Complex(Complex::new(re, im))),
            prop::collection::vec(finite(), 0..6).prop_map(Value::DoubleVector),
            prop::collection::vec((finite(), finite()), 0..4).prop_map(|pairs| {
                Value::ComplexVector(
                    pairs.into_iter().map(|(re, im)| Complex::new(re, im)).collect(),
                )
            }),
            ("[a-z]{0,6}", proptest::option::of(finite()))
                .prop_map(|(name, value)| Value::NamedPoint(NamedPoint { name, value })),
        ]
    }

    proptest! {
        #[test]
        fn prop_every_tag_but_custom_decodes_its_own_encoding(value in arb_value()) {
            let any = encode_value(&value);
            prop_assert_eq!(value_from_bytes(&any, DataType::Any).unwrap(), value.clone());

            let payload = encode_payload(&value);
            prop_assert!(extract_from_bytes::<f64>(&payload, value.data_type()).is_ok()
                || matches!(value, Value::String(_)));
            prop_assert!(extract_from_bytes::<String>(&payload, value.data_type()).is_ok());
            prop_assert!(extract_from_bytes::<bool>(&payload, value.data_type()).is_ok());
        }

        #[test]
        fn prop_convert_is_idempotent(value in arb_value(), index in 0usize..DataType::ALL.len()) {
            let tag = DataType::ALL[index];
            let mut once = value.clone();
            if value_convert(&mut once, tag).is_ok() {
                let mut twice = once.clone();
                prop_assert!(value_convert(&mut twice, tag).is_ok());
                prop_assert_eq!(encode_value(&once), encode_value(&twice));
            }
        }

        #[test]
        fn prop_i64_extraction_is_exact(n in any::<i64>()) {
            prop_assert_eq!(extract_i64(&Value::Integer(n)).unwrap(), n);
            prop_assert_eq!(extract_string(&Value::Integer(n)).unwrap(), n.to_string());
        }

        #[test]
        fn prop_double_text_roundtrip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
            let text = extract_string(&Value::Double(x)).unwrap();
            let back = extract_f64(&Value::String(text)).unwrap();
            prop_assert_eq!(back.to_bits(), x.to_bits());
        }
    }
}
