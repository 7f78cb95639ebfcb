//! Wire primitives shared by every payload layout.
//!
//! Unsigned integers are LEB128 varints, signed integers are zigzag varints,
//! doubles are 8 bytes little-endian, and strings are a varint byte length
//! followed by UTF-8.

use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over an input buffer. Every read is bounds checked.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining_len(&self) -> usize {
        self.input.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_len() == 0
    }

    /// Fails if any input is left unread.
    pub fn finish(&self, context: &'static str) -> Result<(), DecodeError> {
        match self.remaining_len() {
            0 => Ok(()),
            count => Err(DecodeError::TrailingBytes { context, count }),
        }
    }

    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(n)
            .filter(|end| *end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEof { context })?;
        let bytes = &self.input[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, context)?[0])
    }

    /// Reads a LEB128 varint of at most [`MAX_VARINT_BYTES`] bytes.
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let bits = u64::from(byte & 0x7F);
            let shift = 7 * i as u32;
            // The tenth byte may only carry the top bit of a u64.
            if i == MAX_VARINT_BYTES - 1 && bits > 1 {
                return Err(DecodeError::VarintOverflow);
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintTooLong)
    }

    pub fn read_signed_varint(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        self.read_varint(context).map(zigzag_decode)
    }

    /// Reads an element count, checked against `max` and against the bytes
    /// left (each element takes at least `min_element_size` bytes) so a
    /// corrupt count cannot force a large allocation.
    pub fn read_count(
        &mut self,
        max: usize,
        min_element_size: usize,
        field: &'static str,
    ) -> Result<usize, DecodeError> {
        let raw = self.read_varint(field)?;
        let len = usize::try_from(raw).unwrap_or(usize::MAX);
        if len > max {
            return Err(DecodeError::LengthExceedsLimit { field, len, max });
        }
        if len.saturating_mul(min_element_size) > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context: field });
        }
        Ok(len)
    }

    pub fn read_string(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<String, DecodeError> {
        let len = self.read_count(max_len, 1, field)?;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a little-endian double. NaN payloads are kept.
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        let bytes = self.take(8, context)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Growable output buffer.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    out: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.out.push(byte);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Writes `value` as a LEB128 varint.
    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.out.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.out.push(value as u8);
    }

    pub fn write_signed_varint(&mut self, value: i64) {
        self.write_varint(zigzag_encode(value));
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_varint(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_bytes(&value.to_le_bytes());
    }
}

// =============================================================================
// ZIGZAG
// =============================================================================

/// Maps signed to unsigned so small magnitudes stay short:
/// 0 → 0, -1 → 1, 1 → 2, -2 → 3.
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(v: u64) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_varint(v);
        writer.into_bytes()
    }

    #[test]
    fn test_zigzag_mapping() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        for n in [i64::MIN, -300, 300, i64::MAX] {
            assert_eq!(zigzag_decode(zigzag_encode(n)), n);
        }
    }

    #[test]
    fn test_varint_lengths() {
        assert_eq!(varint_bytes(0), [0x00]);
        assert_eq!(varint_bytes(127), [0x7F]);
        assert_eq!(varint_bytes(128), [0x80, 0x01]);
        assert_eq!(varint_bytes(u64::MAX).len(), MAX_VARINT_BYTES);

        for v in [0u64, 127, 128, 16_383, 16_384, u64::MAX] {
            let bytes = varint_bytes(v);
            let mut reader = Reader::new(&bytes);
            assert_eq!(reader.read_varint("varint").unwrap(), v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_rejects_long_and_overflowing_input() {
        let mut reader = Reader::new(&[0x80u8; 11]);
        assert_eq!(reader.read_varint("varint"), Err(DecodeError::VarintTooLong));

        let mut data = [0xFFu8; 10];
        data[9] = 0x02;
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_varint("varint"), Err(DecodeError::VarintOverflow));
    }

    #[test]
    fn test_eof_carries_context() {
        let mut reader = Reader::new(&[0x80u8]);
        assert_eq!(
            reader.read_varint("length"),
            Err(DecodeError::UnexpectedEof { context: "length" })
        );
        let mut reader = Reader::new(&[1, 2, 3]);
        assert!(reader.read_f64("double").is_err());
    }

    #[test]
    fn test_nan_double_survives() {
        let mut writer = Writer::new();
        writer.write_f64(f64::NAN);
        let mut reader = Reader::new(writer.as_bytes());
        assert!(reader.read_f64("double").unwrap().is_nan());
    }

    #[test]
    fn test_string_limits_and_utf8() {
        let mut writer = Writer::new();
        writer.write_string(&"a".repeat(200));
        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "name"),
            Err(DecodeError::LengthExceedsLimit { len: 200, max: 100, .. })
        ));

        let mut writer = Writer::new();
        writer.write_varint(2);
        writer.write_bytes(&[0xC3, 0x28]);
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(
            reader.read_string(100, "name"),
            Err(DecodeError::InvalidUtf8 { field: "name" })
        );
    }

    #[test]
    fn test_count_bounded_by_remaining_input() {
        let mut writer = Writer::new();
        writer.write_varint(1_000);
        writer.write_f64(1.0);
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(
            reader.read_count(10_000, 8, "vector"),
            Err(DecodeError::UnexpectedEof { context: "vector" })
        );
    }

    #[test]
    fn test_finish_reports_trailing_bytes() {
        let mut reader = Reader::new(&[1u8, 2, 3]);
        reader.read_byte("tag").unwrap();
        assert_eq!(
            reader.finish("value"),
            Err(DecodeError::TrailingBytes { context: "value", count: 2 })
        );
    }
}
