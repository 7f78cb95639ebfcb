//! Value encoding/decoding.
//!
//! Each storage type has a fixed payload layout:
//!
//! | Type | Payload |
//! |---|---|
//! | string | varint length + UTF-8 bytes |
//! | double | 8 bytes, little-endian |
//! | integer | zigzag varint |
//! | complex | real double + imaginary double |
//! | double vector | varint count + doubles |
//! | complex vector | varint count + complex pairs |
//! | named point | string + double (NaN when no value) |
//!
//! The self-describing form used for [`DataType::Any`] prefixes the payload
//! with the one-byte branch index of the [`Value`].

use tracing::debug;

use crate::codec::json::decode_json;
use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::{MAX_STRING_LEN, MAX_VECTOR_LEN};
use crate::model::{Complex, DataType, NamedPoint, Value};

/// A storage type with a binary payload layout.
pub trait WireValue: Sized {
    /// The tag describing a buffer holding just this payload.
    const DATA_TYPE: DataType;

    /// Appends the payload to `writer`.
    fn encode(&self, writer: &mut Writer);

    /// Reads one payload from `reader`.
    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError>;
}

impl WireValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn encode(&self, writer: &mut Writer) {
        writer.write_string(self);
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        reader.read_string(MAX_STRING_LEN, "string")
    }
}

impl WireValue for f64 {
    const DATA_TYPE: DataType = DataType::Double;

    fn encode(&self, writer: &mut Writer) {
        writer.write_f64(*self);
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        reader.read_f64("double")
    }
}

impl WireValue for i64 {
    const DATA_TYPE: DataType = DataType::Int;

    fn encode(&self, writer: &mut Writer) {
        writer.write_signed_varint(*self);
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        reader.read_signed_varint("int64")
    }
}

impl WireValue for Complex {
    const DATA_TYPE: DataType = DataType::Complex;

    fn encode(&self, writer: &mut Writer) {
        writer.write_f64(self.re);
        writer.write_f64(self.im);
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let re = reader.read_f64("complex.re")?;
        let im = reader.read_f64("complex.im")?;
        Ok(Complex { re, im })
    }
}

impl WireValue for Vec<f64> {
    const DATA_TYPE: DataType = DataType::Vector;

    fn encode(&self, writer: &mut Writer) {
        writer.write_varint(self.len() as u64);
        for v in self {
            writer.write_f64(*v);
        }
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let count = reader.read_count(MAX_VECTOR_LEN, 8, "double_vector")?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(reader.read_f64("double_vector")?);
        }
        Ok(values)
    }
}

impl WireValue for Vec<Complex> {
    const DATA_TYPE: DataType = DataType::ComplexVector;

    fn encode(&self, writer: &mut Writer) {
        writer.write_varint(self.len() as u64);
        for c in self {
            c.encode(writer);
        }
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let count = reader.read_count(MAX_VECTOR_LEN, 16, "complex_vector")?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(Complex::decode(reader)?);
        }
        Ok(values)
    }
}

impl WireValue for NamedPoint {
    const DATA_TYPE: DataType = DataType::NamedPoint;

    fn encode(&self, writer: &mut Writer) {
        writer.write_string(&self.name);
        writer.write_f64(self.value.unwrap_or(f64::NAN));
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let name = reader.read_string(MAX_STRING_LEN, "named_point.name")?;
        let value = reader.read_f64("named_point.value")?;
        Ok(NamedPoint::new(name, value))
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a whole buffer as one `T` payload.
pub fn decode<T: WireValue>(data: &[u8]) -> Result<T, DecodeError> {
    let mut reader = Reader::new(data);
    let value = T::decode(&mut reader)?;
    reader.finish(T::DATA_TYPE.name())?;
    Ok(value)
}

/// Decodes a self-describing buffer (branch byte + payload).
pub fn decode_value(data: &[u8]) -> Result<Value, DecodeError> {
    let mut reader = Reader::new(data);
    let index = reader.read_byte("branch")?;
    let value = match index {
        0 => Value::Double(f64::decode(&mut reader)?),
        1 => Value::Integer(i64::decode(&mut reader)?),
        2 => Value::String(String::decode(&mut reader)?),
        3 => Value::Complex(Complex::decode(&mut reader)?),
        4 => Value::DoubleVector(Vec::<f64>::decode(&mut reader)?),
        5 => Value::ComplexVector(Vec::<Complex>::decode(&mut reader)?),
        6 => Value::NamedPoint(NamedPoint::decode(&mut reader)?),
        _ => return Err(DecodeError::InvalidBranch { index }),
    };
    reader.finish("any")?;
    Ok(value)
}

/// Decodes a buffer according to its declared tag.
///
/// BOOL buffers carry text and decode to an integer 0 or 1 (anything other
/// than `"0"` is true). INT and TIME share the integer payload. CUSTOM has
/// no interpretation and always fails.
pub fn decode_tagged(data: &[u8], tag: DataType) -> Result<Value, DecodeError> {
    match tag {
        DataType::Any => decode_value(data),
        DataType::String => decode::<String>(data).map(Value::String),
        DataType::Bool => {
            let text = decode::<String>(data)?;
            Ok(Value::Integer(i64::from(text != "0")))
        }
        DataType::NamedPoint => decode::<NamedPoint>(data).map(Value::NamedPoint),
        DataType::Double => decode::<f64>(data).map(Value::Double),
        DataType::Int | DataType::Time => decode::<i64>(data).map(Value::Integer),
        DataType::Vector => decode::<Vec<f64>>(data).map(Value::DoubleVector),
        DataType::Complex => decode::<Complex>(data).map(Value::Complex),
        DataType::ComplexVector => decode::<Vec<Complex>>(data).map(Value::ComplexVector),
        DataType::Json => decode_json(data),
        DataType::Custom => {
            debug!(len = data.len(), "rejecting buffer with custom data type");
            Err(DecodeError::UnsupportedTag { tag })
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one `T` payload into a fresh buffer.
pub fn encode<T: WireValue>(value: &T) -> Vec<u8> {
    let mut writer = Writer::new();
    value.encode(&mut writer);
    writer.into_bytes()
}

/// Encodes a value in the self-describing form (branch byte + payload).
pub fn encode_value(value: &Value) -> Vec<u8> {
    let mut writer = Writer::with_capacity(16);
    writer.write_byte(value.index());
    match value {
        Value::Double(v) => v.encode(&mut writer),
        Value::Integer(v) => v.encode(&mut writer),
        Value::String(v) => v.encode(&mut writer),
        Value::Complex(v) => v.encode(&mut writer),
        Value::DoubleVector(v) => v.encode(&mut writer),
        Value::ComplexVector(v) => v.encode(&mut writer),
        Value::NamedPoint(v) => v.encode(&mut writer),
    }
    writer.into_bytes()
}

/// Encodes a value's payload without a branch byte.
///
/// The buffer's tag is then [`Value::data_type`].
pub fn encode_payload(value: &Value) -> Vec<u8> {
    match value {
        Value::Double(v) => encode(v),
        Value::Integer(v) => encode(v),
        Value::String(v) => encode(v),
        Value::Complex(v) => encode(v),
        Value::DoubleVector(v) => encode(v),
        Value::ComplexVector(v) => encode(v),
        Value::NamedPoint(v) => encode(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_branches() -> Vec<Value> {
        vec![
            Value::Double(-3.25),
            Value::Integer(i64::MIN),
            Value::String("hello world".into()),
            Value::Complex(Complex::new(1.0, -2.0)),
            Value::DoubleVector(vec![1.0, 2.0, 3.5]),
            Value::ComplexVector(vec![Complex::new(0.5, 1.5), Complex::ZERO]),
            Value::NamedPoint(NamedPoint::new("voltage", 120.0)),
            Value::NamedPoint(NamedPoint::name_only("open")),
        ]
    }

    #[test]
    fn test_any_roundtrip_every_branch() {
        for value in all_branches() {
            let bytes = encode_value(&value);
            assert_eq!(bytes[0], value.index());
            assert_eq!(decode_value(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_payload_decodes_under_its_own_tag() {
        for value in all_branches() {
            let bytes = encode_payload(&value);
            assert_eq!(decode_tagged(&bytes, value.data_type()).unwrap(), value);
        }
    }

    #[test]
    fn test_double_bits_preserved() {
        let d = 0.1 + 0.2;
        let decoded = decode::<f64>(&encode(&d)).unwrap();
        assert_eq!(decoded.to_bits(), d.to_bits());
    }

    #[test]
    fn test_named_point_nan_means_no_value() {
        let mut writer = Writer::new();
        writer.write_string("42.5");
        writer.write_f64(f64::NAN);
        let point = decode::<NamedPoint>(writer.as_bytes()).unwrap();
        assert_eq!(point, NamedPoint::name_only("42.5"));
    }

    #[test]
    fn test_named_point_with_nan_survives_roundtrip() {
        let before = Value::NamedPoint(NamedPoint::new("x", f64::NAN));
        let after = decode_value(&encode_value(&before)).unwrap();
        assert_eq!(after, before);

        let literal = NamedPoint {
            name: "x".into(),
            value: Some(f64::NAN),
        };
        let decoded = decode::<NamedPoint>(&encode(&literal)).unwrap();
        assert_eq!(decoded, NamedPoint::name_only("x"));
        assert_eq!(
            crate::convert::text::format_named_point(&literal),
            crate::convert::text::format_named_point(&decoded)
        );
    }

    #[test]
    fn test_bool_tag_reads_text() {
        let zero = encode(&"0".to_string());
        let one = encode(&"true".to_string());
        assert_eq!(decode_tagged(&zero, DataType::Bool).unwrap(), Value::Integer(0));
        assert_eq!(decode_tagged(&one, DataType::Bool).unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_time_tag_shares_integer_payload() {
        let bytes = encode(&1_500_000_000i64);
        assert_eq!(
            decode_tagged(&bytes, DataType::Time).unwrap(),
            Value::Integer(1_500_000_000)
        );
    }

    #[test]
    fn test_custom_tag_always_fails() {
        for bytes in [vec![], vec![0u8, 1, 2], encode_value(&Value::Double(1.0))] {
            assert_eq!(
                decode_tagged(&bytes, DataType::Custom),
                Err(DecodeError::UnsupportedTag { tag: DataType::Custom })
            );
        }
    }

    #[test]
    fn test_invalid_branch_index() {
        assert_eq!(
            decode_value(&[9, 0, 0]),
            Err(DecodeError::InvalidBranch { index: 9 })
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode(&1.0f64);
        bytes.push(0);
        assert!(matches!(
            decode::<f64>(&bytes),
            Err(DecodeError::TrailingBytes { count: 1, .. })
        ));
    }

    #[test]
    fn test_truncated_vector() {
        let mut bytes = encode(&vec![1.0, 2.0]);
        bytes.truncate(bytes.len() - 1);
        assert!(decode::<Vec<f64>>(&bytes).is_err());
    }
}
