//! In-place conversion of a value to another tag's storage type.

use tracing::trace;

use crate::convert::extract::{
    extract_bool, extract_complex, extract_complex_vector, extract_f64, extract_i64,
    extract_named_point, extract_string, extract_time, extract_vector,
};
use crate::error::ExtractError;
use crate::model::{DataType, Value};

/// Converts `value` in place to the storage branch for `tag`.
///
/// BOOL becomes an integer 0 or 1 and TIME an integer tick count. ANY and
/// JSON leave the value as is. On error `value` is not modified.
pub fn value_convert(value: &mut Value, tag: DataType) -> Result<(), ExtractError> {
    let converted = match tag {
        DataType::Any | DataType::Json => return Ok(()),
        DataType::Custom => return Err(ExtractError::UnsupportedTag { tag }),
        DataType::String => Value::String(extract_string(value)?),
        DataType::Bool => Value::Integer(i64::from(extract_bool(value)?)),
        DataType::NamedPoint => Value::NamedPoint(extract_named_point(value)?),
        DataType::Double => Value::Double(extract_f64(value)?),
        DataType::Int => Value::Integer(extract_i64(value)?),
        DataType::Time => Value::Integer(extract_time(value)?.ticks()),
        DataType::Vector => Value::DoubleVector(extract_vector(value)?),
        DataType::Complex => Value::Complex(extract_complex(value)?),
        DataType::ComplexVector => Value::ComplexVector(extract_complex_vector(value)?),
    };
    trace!(from = %value.data_type(), to = %tag, "converted value");
    *value = converted;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_value;
    use crate::model::{Complex, NamedPoint};

    fn samples() -> Vec<Value> {
        vec![
            Value::Double(2.5),
            Value::Double(-0.0),
            Value::Integer(-4),
            Value::String("12".into()),
            Value::String("3-4j".into()),
            Value::String("[1,2]".into()),
            Value::Complex(Complex::new(0.5, -1.5)),
            Value::DoubleVector(vec![]),
            Value::DoubleVector(vec![3.0, 4.0]),
            Value::ComplexVector(vec![Complex::new(1.0, 1.0), Complex::new(2.0, 0.0)]),
            Value::NamedPoint(NamedPoint::new("bus", 1.0)),
            Value::NamedPoint(NamedPoint::name_only("idle")),
        ]
    }

    #[test]
    fn test_conversion_is_idempotent() {
        for tag in DataType::ALL {
            for sample in samples() {
                let mut once = sample.clone();
                if value_convert(&mut once, tag).is_err() {
                    continue;
                }
                let mut twice = once.clone();
                value_convert(&mut twice, tag).unwrap();
                // Compared as bytes so NaN sentinels match themselves.
                assert_eq!(
                    encode_value(&once),
                    encode_value(&twice),
                    "{:?} -> {}",
                    sample,
                    tag
                );
            }
        }
    }

    #[test]
    fn test_own_tag_is_identity() {
        for sample in samples() {
            let mut converted = sample.clone();
            value_convert(&mut converted, sample.data_type()).unwrap();
            assert_eq!(converted, sample);
        }
    }

    #[test]
    fn test_conversion_targets() {
        let mut v = Value::Complex(Complex::new(3.0, 4.0));
        value_convert(&mut v, DataType::Double).unwrap();
        assert_eq!(v, Value::Double(5.0));

        let mut v = Value::Double(1.25);
        value_convert(&mut v, DataType::Time).unwrap();
        assert_eq!(v, Value::Integer(1_250_000_000));

        let mut v = Value::String("0".into());
        value_convert(&mut v, DataType::Bool).unwrap();
        assert_eq!(v, Value::Integer(0));

        let mut v = Value::Integer(7);
        value_convert(&mut v, DataType::String).unwrap();
        assert_eq!(v, Value::String("7".into()));

        let mut v = Value::Double(2.0);
        value_convert(&mut v, DataType::ComplexVector).unwrap();
        assert_eq!(v, Value::ComplexVector(vec![Complex::new(2.0, 0.0)]));
    }

    #[test]
    fn test_any_and_json_leave_value_unchanged() {
        for tag in [DataType::Any, DataType::Json] {
            let mut v = Value::DoubleVector(vec![1.0]);
            value_convert(&mut v, tag).unwrap();
            assert_eq!(v, Value::DoubleVector(vec![1.0]));
        }
    }

    #[test]
    fn test_failure_leaves_value_untouched() {
        let mut v = Value::String("not a number".into());
        assert!(value_convert(&mut v, DataType::Double).is_err());
        assert_eq!(v, Value::String("not a number".into()));

        let mut v = Value::Integer(3);
        assert_eq!(
            value_convert(&mut v, DataType::Custom),
            Err(ExtractError::UnsupportedTag { tag: DataType::Custom })
        );
        assert_eq!(v, Value::Integer(3));
    }
}
