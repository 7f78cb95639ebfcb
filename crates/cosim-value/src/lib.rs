//! Typed value interchange for co-simulation exchanges.
//!
//! This crate represents one published or subscribed data item as a
//! [`Value`], a closed union of seven storage branches, and provides the
//! conversions around it.
//!
//! # Overview
//!
//! - **Canonicalization**: producer-side primitives are widened to one
//!   storage type per kind (`bool`/`i32`/`char` → `i64`, `f32` → `f64`, ...)
//! - **Extraction**: any concrete type can be read back out of a [`Value`],
//!   or directly out of a byte buffer tagged with a [`DataType`]
//! - **Change detection**: a candidate is compared against the stored value
//!   under a numeric tolerance
//! - **Conversion**: a stored value can be rewritten to another tag's
//!   storage type in place
//!
//! # Quick Start
//!
//! ```rust
//! use cosim_value::{
//!     canonicalize, change_detected, encode_tagged, extract_from_bytes, value_extract,
//!     DataType, Value,
//! };
//!
//! // Store a producer value in canonical form
//! let stored = Value::from_canonical(true);
//! assert_eq!(stored, Value::Integer(1));
//! assert_eq!(canonicalize(7u16), 7i64);
//!
//! // Extract whatever the consumer asks for
//! let text: String = value_extract(&stored).unwrap();
//! assert_eq!(text, "1");
//!
//! // Across a transport boundary
//! let bytes = encode_tagged(&Value::Double(5.0), DataType::Double).unwrap();
//! let n: i64 = extract_from_bytes(&bytes, DataType::Double).unwrap();
//! assert_eq!(n, 5);
//!
//! // Only propagate material changes
//! assert!(!change_detected(&Value::Double(5.0), &5.005, 0.01));
//! assert!(change_detected(&Value::Double(5.0), &5.02, 0.01));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Value, DataType, Complex, NamedPoint, Time)
//! - [`codec`]: Binary and JSON encoding/decoding
//! - [`convert`]: Extraction, change detection and in-place conversion
//! - [`util`]: Buffered log file
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! Byte buffers are treated as untrusted input:
//! - All allocations are bounded by [`limits`]
//! - Varints are limited to prevent overflow
//! - A buffer must be consumed exactly; trailing bytes are an error

pub mod codec;
pub mod convert;
pub mod error;
pub mod limits;
pub mod model;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_json, decode_tagged, decode_value, encode, encode_json, encode_value,
};
pub use convert::{
    change_detected, encode_tagged, extract_bool, extract_char, extract_complex,
    extract_complex_vector, extract_f32, extract_f64, extract_from_bytes, extract_i32,
    extract_i64, extract_named_point, extract_string, extract_time, extract_vector,
    value_convert, value_extract, value_from_bytes, ChangeFilter, DetectChange, Extract,
};
pub use error::{DecodeError, EncodeError, ErrorKind, ExtractError, LogBufferError};
pub use model::{
    canonicalize, Canonicalize, Complex, Complex32, DataType, NamedPoint, Time, Value,
};
pub use util::LogBuffer;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
