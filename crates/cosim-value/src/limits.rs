//! Bounds enforced while decoding untrusted buffers.
//!
//! Every length read from the wire is checked against these limits before
//! anything is allocated.

/// Maximum bytes in an unsigned LEB128 varint (enough for a u64).
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum byte length of a decoded string or named-point name (16 MiB).
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum element count of a decoded double or complex vector.
pub const MAX_VECTOR_LEN: usize = 4 * 1024 * 1024;
