//! Fixture encoder for the grid integration tests and benches.
//!
//! [`WireWriter`] produces the exact byte layout the decoders consume:
//! big-endian scalars, u16-prefixed modified UTF-8 strings and
//! i32-prefixed arrays. It exists so tests can state inputs as values
//! instead of hand-written byte literals.

use std::io::{self, Read};

/// Builder that appends wire-encoded values to an in-memory buffer.
///
/// ```rust
/// use grid_tests::WireWriter;
///
/// let bytes = WireWriter::new().int_array(Some(&[7, 8, 9])).finish();
/// assert_eq!(bytes.len(), 16);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

macro_rules! scalar {
    ($name:ident, $ty:ty) => {
        #[must_use]
        pub fn $name(mut self, value: $ty) -> Self {
            self.buf.extend_from_slice(&value.to_be_bytes());
            self
        }
    };
}

macro_rules! array {
    ($name:ident, $ty:ty) => {
        /// Append an i32 length prefix (-1 for `None`) and the elements.
        #[must_use]
        pub fn $name(mut self, values: Option<&[$ty]>) -> Self {
            match values {
                None => self.int(-1),
                Some(values) => {
                    self = self.len_prefix(values.len());
                    for value in values {
                        self.buf.extend_from_slice(&value.to_be_bytes());
                    }
                    self
                }
            }
        }
    };
}

impl WireWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    scalar!(byte, i8);
    scalar!(short, i16);
    scalar!(char, u16);
    scalar!(int, i32);
    scalar!(long, i64);
    scalar!(float, f32);
    scalar!(double, f64);

    #[must_use]
    pub fn boolean(self, value: bool) -> Self {
        self.byte(i8::from(value))
    }

    /// Append raw bytes with no prefix.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a u16 byte-length prefix and the modified UTF-8 body.
    ///
    /// # Panics
    ///
    /// Panics if the encoded body exceeds `u16::MAX` bytes.
    #[must_use]
    pub fn utf(mut self, value: &str) -> Self {
        let body = encode_modified_utf8(value);
        let len = u16::try_from(body.len()).expect("string too long for a u16 prefix");
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(&body);
        self
    }

    array!(short_array, i16);
    array!(char_array, u16);
    array!(int_array, i32);
    array!(long_array, i64);
    array!(float_array, f32);
    array!(double_array, f64);

    #[must_use]
    pub fn byte_array(mut self, values: Option<&[u8]>) -> Self {
        match values {
            None => self.int(-1),
            Some(values) => {
                self = self.len_prefix(values.len());
                self.raw(values)
            }
        }
    }

    #[must_use]
    pub fn boolean_array(mut self, values: Option<&[bool]>) -> Self {
        match values {
            None => self.int(-1),
            Some(values) => {
                self = self.len_prefix(values.len());
                self.buf.extend(values.iter().map(|&b| u8::from(b)));
                self
            }
        }
    }

    fn len_prefix(self, len: usize) -> Self {
        self.int(i32::try_from(len).expect("array too long for an i32 prefix"))
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode `value` as modified UTF-8: NUL as `0xC0 0x80`, every UTF-16
/// unit outside the one-byte range as a 2- or 3-byte sequence.
#[must_use]
pub fn encode_modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

/// A source that returns at most `chunk` bytes per `read` call, to make
/// values straddle refill boundaries.
#[derive(Debug)]
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk: chunk.max(1),
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_int_array_layout() {
        let bytes = WireWriter::new().int_array(Some(&[7, 8, 9])).finish();
        assert_eq!(
            bytes,
            [0, 0, 0, 3, 0, 0, 0, 7, 0, 0, 0, 8, 0, 0, 0, 9]
        );
    }

    #[test]
    fn absent_array_is_minus_one() {
        let bytes = WireWriter::new().long_array(None).finish();
        assert_eq!(bytes, [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn modified_utf8_nul() {
        assert_eq!(encode_modified_utf8("a\0"), [b'a', 0xC0, 0x80]);
    }

    #[test]
    fn chunked_reader_caps_each_read() {
        let mut reader = ChunkedReader::new(&[1, 2, 3, 4, 5], 2);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(reader.read(&mut buf).unwrap(), 1);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
}
