//! JSON form of values.
//!
//! The tagged object form is `{"type": <name>, "value": <payload>}` where
//! `<name>` is a [`DataType`] name. Complex numbers are `[re, im]`, complex
//! vectors are flat interleaved arrays, and named points carry a separate
//! `"name"` field. Bare JSON numbers, strings, booleans and numeric arrays are
//! accepted too.

use serde_json::{json, Map, Value as Json};

use crate::error::DecodeError;
use crate::model::{Complex, DataType, NamedPoint, Time, Value};

/// Decodes a UTF-8 JSON buffer into a value.
pub fn decode_json(data: &[u8]) -> Result<Value, DecodeError> {
    let parsed: Json =
        serde_json::from_slice(data).map_err(|e| DecodeError::Json(e.to_string()))?;
    json_to_value(&parsed)
}

/// Encodes a value as tagged JSON text.
pub fn encode_json(value: &Value) -> String {
    let payload = match value {
        Value::Double(v) => json!(v),
        Value::Integer(v) => json!(v),
        Value::String(v) => json!(v),
        Value::Complex(c) => json!([c.re, c.im]),
        Value::DoubleVector(v) => json!(v),
        Value::ComplexVector(v) => {
            Json::Array(v.iter().flat_map(|c| [json!(c.re), json!(c.im)]).collect())
        }
        Value::NamedPoint(p) => {
            return json!({
                "type": DataType::NamedPoint.name(),
                "name": p.name,
                "value": p.value,
            })
            .to_string();
        }
    };
    json!({ "type": value.data_type().name(), "value": payload }).to_string()
}

fn json_to_value(json: &Json) -> Result<Value, DecodeError> {
    match json {
        Json::Number(_) => Ok(number_value(json)),
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        Json::Array(items) => numbers(items).map(Value::DoubleVector),
        Json::Object(map) => object_to_value(map),
        Json::Null => Err(malformed("null has no value")),
    }
}

fn object_to_value(map: &Map<String, Json>) -> Result<Value, DecodeError> {
    let payload = map.get("value").unwrap_or(&Json::Null);
    let Some(type_name) = map.get("type").and_then(Json::as_str) else {
        return match map.get("value") {
            Some(inner) => json_to_value(inner),
            None => Err(malformed("object has neither \"type\" nor \"value\"")),
        };
    };
    let data_type: DataType = type_name
        .parse()
        .map_err(|_| malformed(&format!("unknown type name {type_name:?}")))?;

    match data_type {
        DataType::Double => match payload {
            Json::Null => Ok(Value::Double(f64::NAN)),
            other => number(other).map(Value::Double),
        },
        DataType::Int => match payload.as_i64() {
            Some(v) => Ok(Value::Integer(v)),
            None => number(payload).map(|v| Value::Integer(v as i64)),
        },
        DataType::Bool => match payload {
            Json::Bool(b) => Ok(Value::Integer(i64::from(*b))),
            Json::String(s) => Ok(Value::Integer(i64::from(s != "0"))),
            other => number(other).map(|v| Value::Integer(i64::from(v != 0.0))),
        },
        DataType::Time => match payload.as_i64() {
            Some(ticks) => Ok(Value::Integer(ticks)),
            None => number(payload).map(|s| Value::Integer(Time::from_seconds(s).ticks())),
        },
        DataType::String => Ok(Value::String(match payload {
            Json::String(s) => s.clone(),
            other => other.to_string(),
        })),
        DataType::Complex => match payload {
            Json::Array(items) => {
                let parts = numbers(items)?;
                match parts.as_slice() {
                    [re] => Ok(Value::Complex(Complex::new(*re, 0.0))),
                    [re, im] => Ok(Value::Complex(Complex::new(*re, *im))),
                    _ => Err(malformed("complex value needs one or two components")),
                }
            }
            other => number(other).map(|re| Value::Complex(Complex::from(re))),
        },
        DataType::Vector => match payload {
            Json::Array(items) => numbers(items).map(Value::DoubleVector),
            other => number(other).map(|v| Value::DoubleVector(vec![v])),
        },
        DataType::ComplexVector => {
            let Json::Array(items) = payload else {
                return Err(malformed("complex_vector value must be an array"));
            };
            let flat = numbers(items)?;
            if flat.len() % 2 != 0 {
                return Err(malformed("complex_vector needs an even number of components"));
            }
            Ok(Value::ComplexVector(
                flat.chunks_exact(2)
                    .map(|pair| Complex::new(pair[0], pair[1]))
                    .collect(),
            ))
        }
        DataType::NamedPoint => {
            let name = map
                .get("name")
                .and_then(Json::as_str)
                .unwrap_or_default()
                .to_string();
            let value = match payload {
                Json::Null => None,
                other => Some(number(other)?),
            };
            Ok(Value::NamedPoint(NamedPoint { name, value }))
        }
        DataType::Any | DataType::Json | DataType::Custom => Err(malformed(&format!(
            "type {data_type} cannot appear inside a JSON value"
        ))),
    }
}

fn number_value(json: &Json) -> Value {
    match json.as_i64() {
        Some(v) => Value::Integer(v),
        None => Value::Double(json.as_f64().unwrap_or(f64::NAN)),
    }
}

fn number(json: &Json) -> Result<f64, DecodeError> {
    json.as_f64()
        .ok_or_else(|| malformed(&format!("expected a number, found {json}")))
}

fn numbers(items: &[Json]) -> Result<Vec<f64>, DecodeError> {
    items.iter().map(number).collect()
}

fn malformed(message: &str) -> DecodeError {
    DecodeError::Json(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(text: &str) -> Result<Value, DecodeError> {
        decode_json(text.as_bytes())
    }

    #[test]
    fn test_tagged_roundtrip() {
        let values = [
            Value::Double(2.5),
            Value::Integer(-7),
            Value::String("abc".into()),
            Value::Complex(Complex::new(1.0, -1.0)),
            Value::DoubleVector(vec![1.0, 2.0]),
            Value::ComplexVector(vec![Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)]),
            Value::NamedPoint(NamedPoint::new("p", 3.0)),
            Value::NamedPoint(NamedPoint::name_only("closed")),
        ];
        for value in values {
            let text = encode_json(&value);
            assert_eq!(decode_str(&text).unwrap(), value, "failed for {}", text);
        }
    }

    #[test]
    fn test_bare_values() {
        assert_eq!(decode_str("4").unwrap(), Value::Integer(4));
        assert_eq!(decode_str("4.5").unwrap(), Value::Double(4.5));
        assert_eq!(decode_str("\"x\"").unwrap(), Value::String("x".into()));
        assert_eq!(decode_str("true").unwrap(), Value::Integer(1));
        assert_eq!(
            decode_str("[3, 4]").unwrap(),
            Value::DoubleVector(vec![3.0, 4.0])
        );
        assert_eq!(decode_str("{\"value\": 2}").unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_typed_coercions() {
        assert_eq!(
            decode_str(r#"{"type":"double","value":3}"#).unwrap(),
            Value::Double(3.0)
        );
        assert_eq!(
            decode_str(r#"{"type":"bool","value":false}"#).unwrap(),
            Value::Integer(0)
        );
        assert_eq!(
            decode_str(r#"{"type":"time","value":1.5}"#).unwrap(),
            Value::Integer(1_500_000_000)
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode_str("{"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_str("null"), Err(DecodeError::Json(_))));
        assert!(matches!(
            decode_str(r#"{"type":"complex_vector","value":[1,2,3]}"#),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_str(r#"{"type":"custom","value":1}"#),
            Err(DecodeError::Json(_))
        ));
    }
}
