use std::io;
use std::mem;

use crate::access::RandomAccess;
use crate::config::InputConfig;
use crate::error::InputError;
use crate::input::{self, DataInput};

/// Random-access input over an in-memory byte sequence.
///
/// `BufferInput` decodes straight out of the backing bytes without
/// copying them. The backing can be anything that derefs to a byte slice:
/// a borrowed `&[u8]`, an owned `Vec<u8>`, a shared `bytes::Bytes`, or a
/// `&mut [u8]` when the caller wants to patch bytes in place.
///
/// ```text
///   0                 pos                         size
///   ├──── consumed ────┼──────── remaining ──────────┤
///                      ▲
///                      sequential cursor
///
///   read_int_at(p) reads [p, p + 4) and leaves the cursor alone.
/// ```
///
/// The cursor always stays within `[0, size]`.
///
/// # Example
///
/// ```rust
/// use grid_io::{BufferInput, DataInput, RandomAccess};
///
/// let bytes: [u8; 16] = [0, 0, 0, 3, 0, 0, 0, 7, 0, 0, 0, 8, 0, 0, 0, 9];
/// let mut input = BufferInput::new(&bytes[..]);
///
/// assert_eq!(input.read_int_array().unwrap(), Some(vec![7, 8, 9]));
/// assert_eq!(input.position().unwrap(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct BufferInput<B> {
    buf: B,
    /// Addressable window `[start, end)` of the backing bytes.
    start: usize,
    end: usize,
    /// Cursor, relative to `start`.
    pos: usize,
    config: InputConfig,
}

impl<B: AsRef<[u8]>> BufferInput<B> {
    /// Wrap `buf` with the default configuration. The cursor starts at 0.
    #[must_use]
    pub fn new(buf: B) -> Self {
        Self::with_config(buf, InputConfig::default())
    }

    /// Wrap `buf` with an explicit configuration.
    #[must_use]
    pub fn with_config(buf: B, config: InputConfig) -> Self {
        if config != InputConfig::default() {
            log::debug!(
                "buffer input over {} bytes with {config:?}",
                buf.as_ref().len()
            );
        }
        let end = buf.as_ref().len();
        Self {
            buf,
            start: 0,
            end,
            pos: 0,
            config,
        }
    }

    /// Wrap the `len` bytes of `buf` starting at `off`.
    ///
    /// Positions, [`size`](RandomAccess::size) and
    /// [`array`](RandomAccess::array) all refer to the window; bytes
    /// outside it are never read.
    ///
    /// # Errors
    ///
    /// [`InputError::OutOfRange`] if `off + len` exceeds the backing length.
    pub fn with_window(
        buf: B,
        off: usize,
        len: usize,
        config: InputConfig,
    ) -> Result<Self, InputError> {
        let mut input = Self::with_config(buf, config);
        input.set_window(off, len)?;
        Ok(input)
    }

    /// Point this input at new backing bytes, returning the previous ones.
    ///
    /// The cursor restarts at 0 and the whole of `buf` is addressable.
    /// The configuration is kept.
    pub fn rebind(&mut self, buf: B) -> B {
        log::debug!(
            "rebinding buffer input at {} of {} bytes to {} bytes",
            self.pos,
            self.end - self.start,
            buf.as_ref().len()
        );
        self.start = 0;
        self.end = buf.as_ref().len();
        self.pos = 0;
        mem::replace(&mut self.buf, buf)
    }

    /// Like [`rebind`](Self::rebind), restricted to `len` bytes at `off`.
    ///
    /// # Errors
    ///
    /// [`InputError::OutOfRange`] if `off + len` exceeds the length of
    /// `buf`. The input is left untouched in that case.
    pub fn rebind_window(&mut self, buf: B, off: usize, len: usize) -> Result<B, InputError> {
        check_window(buf.as_ref().len(), off, len)?;
        let previous = self.rebind(buf);
        self.start = off;
        self.end = off + len;
        Ok(previous)
    }

    fn set_window(&mut self, off: usize, len: usize) -> Result<(), InputError> {
        let end = check_window(self.buf.as_ref().len(), off, len)?;
        self.start = off;
        self.end = end;
        self.pos = 0;
        Ok(())
    }

    /// Number of bytes between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.as_slice().len() - self.pos
    }

    /// The backing value itself, e.g. the `Bytes` handle it was built with.
    #[must_use]
    pub fn backing(&self) -> &B {
        &self.buf
    }

    /// Release the backing value.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.buf
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf.as_ref()[self.start..self.end]
    }

    /// The `width` bytes starting at `pos`, bounds-checked.
    fn window(&self, pos: usize, width: usize) -> Result<&[u8], InputError> {
        let size = self.as_slice().len();
        pos.checked_add(width)
            .filter(|&end| end <= size)
            .map(|end| &self.as_slice()[pos..end])
            .ok_or(InputError::OutOfRange { pos, width, size })
    }

    fn window_array<const N: usize>(&self, pos: usize) -> Result<[u8; N], InputError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.window(pos, N)?);
        Ok(out)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BufferInput<B> {
    /// Mutable access to the backing bytes.
    ///
    /// This is a live alias: bytes written here are what subsequent
    /// decodes (sequential and positional) will see. The cursor is not
    /// touched.
    #[must_use]
    pub fn array_mut(&mut self) -> &mut [u8] {
        &mut self.buf.as_mut()[self.start..self.end]
    }
}

/// End of the window `[off, off + len)` inside `size` bytes.
fn check_window(size: usize, off: usize, len: usize) -> Result<usize, InputError> {
    off.checked_add(len)
        .filter(|&end| end <= size)
        .ok_or(InputError::OutOfRange {
            pos: off,
            width: len,
            size,
        })
}

impl<B: AsRef<[u8]>> DataInput for BufferInput<B> {
    fn read_raw(&mut self) -> Result<Option<u8>, InputError> {
        let byte = self.as_slice().get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, InputError> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        let n = dst.len().min(self.remaining());
        if n == 0 {
            return Ok(None);
        }
        dst[..n].copy_from_slice(&self.as_slice()[self.pos..self.pos + n]);
        self.pos += n;
        Ok(Some(n))
    }

    fn read_fully(&mut self, dst: &mut [u8]) -> Result<(), InputError> {
        if dst.len() > self.remaining() {
            return Err(InputError::UnexpectedEof {
                offset: self.pos,
                needed: dst.len(),
            });
        }
        dst.copy_from_slice(&self.as_slice()[self.pos..self.pos + dst.len()]);
        self.pos += dst.len();
        Ok(())
    }

    fn skip_bytes(&mut self, n: usize) -> Result<usize, InputError> {
        let n = n.min(self.remaining());
        self.pos += n;
        Ok(n)
    }

    fn consumed(&self) -> usize {
        self.pos
    }

    fn config(&self) -> &InputConfig {
        &self.config
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.remaining())
    }
}

impl<B: AsRef<[u8]>> RandomAccess for BufferInput<B> {
    fn position(&self) -> Result<usize, InputError> {
        Ok(self.pos)
    }

    fn set_position(&mut self, pos: usize) -> Result<(), InputError> {
        let size = self.as_slice().len();
        if pos > size {
            return Err(InputError::OutOfRange { pos, width: 0, size });
        }
        self.pos = pos;
        Ok(())
    }

    fn size(&self) -> Result<usize, InputError> {
        Ok(self.as_slice().len())
    }

    fn array(&self) -> Result<&[u8], InputError> {
        Ok(self.as_slice())
    }

    fn reset(&mut self) -> Result<(), InputError> {
        self.pos = 0;
        Ok(())
    }

    fn read_byte_at(&self, pos: usize) -> Result<i8, InputError> {
        Ok(i8::from_be_bytes(self.window_array(pos)?))
    }

    fn read_short_at(&self, pos: usize) -> Result<i16, InputError> {
        Ok(i16::from_be_bytes(self.window_array(pos)?))
    }

    fn read_int_at(&self, pos: usize) -> Result<i32, InputError> {
        Ok(i32::from_be_bytes(self.window_array(pos)?))
    }
}

impl<B: AsRef<[u8]>> io::Read for BufferInput<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        input::io_read(self, buf)
    }
}
