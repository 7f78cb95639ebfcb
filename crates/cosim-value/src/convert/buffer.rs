//! Extraction from tagged byte buffers, and the matching encode direction.

use tracing::debug;

use crate::codec::{decode_tagged, encode, encode_json, encode_payload, encode_value};
use crate::convert::extract::{extract_bool, Extract};
use crate::convert::retype::value_convert;
use crate::error::{EncodeError, ExtractError};
use crate::model::{DataType, Value};

/// Decodes `data` according to `tag` and extracts a `T` from it.
///
/// CUSTOM buffers are rejected without reading any bytes.
pub fn extract_from_bytes<T: Extract>(data: &[u8], tag: DataType) -> Result<T, ExtractError> {
    let value = value_from_bytes(data, tag)?;
    T::extract(&value)
}

/// Decodes `data` according to `tag` into a [`Value`].
pub fn value_from_bytes(data: &[u8], tag: DataType) -> Result<Value, ExtractError> {
    if tag == DataType::Custom {
        debug!(len = data.len(), "custom buffer has no known interpretation");
        return Err(ExtractError::UnsupportedTag { tag });
    }
    Ok(decode_tagged(data, tag)?)
}

/// Encodes `value` as a buffer declared with `tag`.
///
/// The value is first converted to the tag's storage type, so any value can
/// be published under any tag except CUSTOM.
pub fn encode_tagged(value: &Value, tag: DataType) -> Result<Vec<u8>, EncodeError> {
    match tag {
        DataType::Custom => Err(EncodeError::UnsupportedTag { tag }),
        DataType::Any => Ok(encode_value(value)),
        DataType::Json => Ok(encode_json(value).into_bytes()),
        DataType::Bool => {
            let text = if extract_bool(value)? { "1" } else { "0" };
            Ok(encode(&text.to_string()))
        }
        _ => {
            let mut converted = value.clone();
            value_convert(&mut converted, tag)?;
            Ok(encode_payload(&converted))
        }
    }
}
