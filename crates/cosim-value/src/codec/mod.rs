//! Binary and JSON encoding/decoding for values.
//!
//! The conversion layer only reaches the byte layout through [`WireValue`],
//! [`decode_tagged`] and the JSON adapter.

pub mod json;
pub mod primitives;
pub mod value;

pub use json::{decode_json, encode_json};
pub use primitives::{zigzag_decode, zigzag_encode, Reader, Writer};
pub use value::{
    decode, decode_tagged, decode_value, encode, encode_payload, encode_value, WireValue,
};
