//! Error types for decoding, extraction, encoding, and log buffering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::DataType;

/// Broad category of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text could not be read as a number.
    UnparsableText,
    /// The declared tag has no known interpretation.
    UnsupportedTag,
    /// A numeric value is not a Unicode scalar value.
    InvalidCharacter,
    /// The byte buffer does not match its declared tag.
    MalformedBuffer,
}

impl ErrorKind {
    /// Returns a short stable identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnparsableText => "unparsable_text",
            ErrorKind::UnsupportedTag => "unsupported_tag",
            ErrorKind::InvalidCharacter => "invalid_character",
            ErrorKind::MalformedBuffer => "malformed_buffer",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid value branch index: {index}")]
    InvalidBranch { index: u8 },

    #[error("{count} trailing bytes after {context}")]
    TrailingBytes { context: &'static str, count: usize },

    #[error("data type {tag} cannot be decoded")]
    UnsupportedTag { tag: DataType },

    #[error("malformed JSON value: {0}")]
    Json(String),
}

/// Error while extracting or converting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("unable to parse {text:?} as a number")]
    UnparsableText { text: String },

    #[error("data type {tag} has no known interpretation")]
    UnsupportedTag { tag: DataType },

    #[error("{code} is not a valid character")]
    InvalidCharacter { code: i64 },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ExtractError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::UnparsableText { .. } => ErrorKind::UnparsableText,
            ExtractError::UnsupportedTag { .. }
            | ExtractError::Decode(DecodeError::UnsupportedTag { .. }) => {
                ErrorKind::UnsupportedTag
            }
            ExtractError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            ExtractError::Decode(_) => ErrorKind::MalformedBuffer,
        }
    }

    pub(crate) fn unparsable(text: &str) -> Self {
        ExtractError::UnparsableText {
            text: text.to_string(),
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("data type {tag} cannot be encoded")]
    UnsupportedTag { tag: DataType },

    #[error("value cannot be converted for encoding: {0}")]
    Convert(#[from] ExtractError),
}

/// Error while writing buffered log lines.
#[derive(Debug, Error)]
pub enum LogBufferError {
    #[error("unable to open {} for appending", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write to {} failed", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
