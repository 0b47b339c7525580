use std::io;

use crate::access::RandomAccess;
use crate::array::{self, Element};
use crate::config::InputConfig;
use crate::error::InputError;
use crate::utf::decode_modified_utf8;

/// The decode contract shared by the buffer and stream backends.
///
/// A backend supplies a handful of raw primitives (single byte, bulk copy,
/// exact fill, skip). Every scalar, string and array decode is a provided
/// method built on those primitives, so both backends decode the same bytes
/// into the same values.
///
/// Wire encoding:
///
/// ```text
/// ┌──────────────┬───────┬──────────────────────────────────────────┐
/// │ Value        │ Width │ Encoding                                 │
/// ├──────────────┼───────┼──────────────────────────────────────────┤
/// │ byte / bool  │ 1     │ raw byte, bool = non-zero                │
/// │ short / char │ 2     │ big-endian                               │
/// │ int / float  │ 4     │ big-endian, float as IEEE-754 bits       │
/// │ long / double│ 8     │ big-endian, double as IEEE-754 bits      │
/// │ utf string   │ 2 + n │ u16 byte length, then modified UTF-8     │
/// │ array        │ 4 + k │ i32 count (-1 = absent), then elements   │
/// └──────────────┴───────┴──────────────────────────────────────────┘
/// ```
///
/// Every scalar read either returns the whole value or fails with
/// [`InputError::UnexpectedEof`]; a partially available value is never
/// returned.
pub trait DataInput {
    /// Read one raw byte, or `None` at end of input.
    ///
    /// Unlike [`read_unsigned_byte`](Self::read_unsigned_byte), running
    /// out of input is not an error here.
    ///
    /// # Errors
    ///
    /// Only [`InputError::Io`] from the underlying source.
    fn read_raw(&mut self) -> Result<Option<u8>, InputError>;

    /// Copy up to `dst.len()` bytes into `dst`.
    ///
    /// Returns the number of bytes copied, or `None` if the input is
    /// exhausted. The buffer backend copies everything it can in one call;
    /// the stream backend may return fewer bytes than requested. An empty
    /// `dst` always yields `Some(0)`.
    ///
    /// # Errors
    ///
    /// Only [`InputError::Io`] from the underlying source.
    fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, InputError>;

    /// Fill `dst` completely.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if fewer than `dst.len()` bytes remain.
    fn read_fully(&mut self, dst: &mut [u8]) -> Result<(), InputError>;

    /// Skip up to `n` bytes, returning how many were skipped. Stops early
    /// at end of input without failing.
    ///
    /// # Errors
    ///
    /// Only [`InputError::Io`] from the underlying source.
    fn skip_bytes(&mut self, n: usize) -> Result<usize, InputError>;

    /// Number of bytes consumed so far. Used for error offsets.
    fn consumed(&self) -> usize;

    /// Decoder configuration.
    fn config(&self) -> &InputConfig;

    /// Bytes known to remain, if the backend knows its size.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }

    /// Copy `len` bytes into `dst[off..off + len]`.
    ///
    /// `copy_to(dst, 0, len)` copies into the front of `dst`; it is the same
    /// as `read_fully(&mut dst[..len])` once `len <= dst.len()` is known.
    ///
    /// # Errors
    ///
    /// - [`InputError::OutOfRange`] if the window does not fit in `dst`.
    /// - [`InputError::UnexpectedEof`] if fewer than `len` bytes remain.
    fn copy_to(&mut self, dst: &mut [u8], off: usize, len: usize) -> Result<(), InputError> {
        let end = off
            .checked_add(len)
            .filter(|&end| end <= dst.len())
            .ok_or(InputError::OutOfRange {
                pos: off,
                width: len,
                size: dst.len(),
            })?;
        self.read_fully(&mut dst[off..end])
    }

    // ── Scalars ───────────────────────────────────────────────────────────

    /// Read a signed byte.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_byte(&mut self) -> Result<i8, InputError> {
        Ok(i8::from_be_bytes(read_be(self)?))
    }

    /// Read an unsigned byte.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_unsigned_byte(&mut self) -> Result<u8, InputError> {
        Ok(u8::from_be_bytes(read_be(self)?))
    }

    /// Read a boolean; any non-zero byte is `true`.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_boolean(&mut self) -> Result<bool, InputError> {
        Ok(self.read_unsigned_byte()? != 0)
    }

    /// Read a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_short(&mut self) -> Result<i16, InputError> {
        Ok(i16::from_be_bytes(read_be(self)?))
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_unsigned_short(&mut self) -> Result<u16, InputError> {
        Ok(u16::from_be_bytes(read_be(self)?))
    }

    /// Read a UTF-16 code unit.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_char(&mut self) -> Result<u16, InputError> {
        self.read_unsigned_short()
    }

    /// Read a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_int(&mut self) -> Result<i32, InputError> {
        Ok(i32::from_be_bytes(read_be(self)?))
    }

    /// Read a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_long(&mut self) -> Result<i64, InputError> {
        Ok(i64::from_be_bytes(read_be(self)?))
    }

    /// Read an `f32` from its big-endian IEEE-754 bits.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_float(&mut self) -> Result<f32, InputError> {
        Ok(f32::from_bits(u32::from_be_bytes(read_be(self)?)))
    }

    /// Read an `f64` from its big-endian IEEE-754 bits.
    ///
    /// # Errors
    ///
    /// [`InputError::UnexpectedEof`] if the input ends first, or
    /// [`InputError::Io`] from the underlying source.
    fn read_double(&mut self) -> Result<f64, InputError> {
        Ok(f64::from_bits(u64::from_be_bytes(read_be(self)?)))
    }

    /// Read a length-prefixed modified UTF-8 string.
    ///
    /// The prefix is an unsigned 16-bit byte count. NUL is encoded as
    /// `0xC0 0x80` and supplementary characters as two 3-byte surrogates.
    ///
    /// # Errors
    ///
    /// - [`InputError::UnexpectedEof`] if the prefix or body is truncated.
    /// - [`InputError::MalformedUtf`] if the body is not valid modified UTF-8.
    fn read_utf(&mut self) -> Result<String, InputError> {
        let len = usize::from(self.read_unsigned_short()?);
        let start = self.consumed();
        let mut body = vec![0u8; len];
        self.read_fully(&mut body)?;
        decode_modified_utf8(&body).map_err(|at| {
            log::warn!("malformed modified UTF-8 at offset {}", start + at);
            InputError::MalformedUtf { offset: start + at }
        })
    }

    // ── Arrays ────────────────────────────────────────────────────────────
    //
    // `None` is the absent array (length prefix -1); `Some(vec![])` is a
    // present, empty one.

    /// Read a length-prefixed array of any [`Element`] type.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_array<T: Element>(&mut self) -> Result<Option<Vec<T>>, InputError>
    where
        Self: Sized,
    {
        array::read_array(self)
    }

    /// Read an array of bytes.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of booleans.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_boolean_array(&mut self) -> Result<Option<Vec<bool>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of `i16`.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_short_array(&mut self) -> Result<Option<Vec<i16>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of UTF-16 code units.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_char_array(&mut self) -> Result<Option<Vec<u16>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of `i32`.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_int_array(&mut self) -> Result<Option<Vec<i32>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of `i64`.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_long_array(&mut self) -> Result<Option<Vec<i64>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of `f32`.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_float_array(&mut self) -> Result<Option<Vec<f32>>, InputError> {
        array::read_array(self)
    }

    /// Read an array of `f64`.
    ///
    /// # Errors
    ///
    /// See [`array::read_array`].
    fn read_double_array(&mut self) -> Result<Option<Vec<f64>>, InputError> {
        array::read_array(self)
    }
}

/// The full input surface: sequential decode plus the random-access
/// operations, which stream-backed inputs reject with
/// [`InputError::Unsupported`].
pub trait GridDataInput: DataInput + RandomAccess {}

impl<T: DataInput + RandomAccess + ?Sized> GridDataInput for T {}

/// Read exactly `N` bytes for a fixed-width big-endian scalar.
fn read_be<const N: usize, I: DataInput + ?Sized>(input: &mut I) -> Result<[u8; N], InputError> {
    let mut bytes = [0u8; N];
    input.read_fully(&mut bytes)?;
    Ok(bytes)
}

/// `std::io::Read` adapter shared by the backends: end of input is `Ok(0)`.
pub(crate) fn io_read<I: DataInput + ?Sized>(input: &mut I, buf: &mut [u8]) -> io::Result<usize> {
    Ok(input.read_into(buf)?.unwrap_or(0))
}
