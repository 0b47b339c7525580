use std::io::{self, Read};
use std::mem;

use crate::access::RandomAccess;
use crate::config::InputConfig;
use crate::error::InputError;
use crate::input::{self, DataInput};

/// Sequential input over any `std::io::Read` source.
///
/// The source has no known size and cannot seek, so `StreamInput` only
/// offers forward decoding. Bytes are pulled into an internal buffer on
/// demand; a multi-byte scalar that straddles two underlying reads is
/// reassembled from the buffer transparently.
///
/// ```text
///   source ──read()──▶ buf [ .. head ══ buffered ══ tail .. ]
///                                 │
///                                 └──▶ read_int / read_utf / arrays
/// ```
///
/// Every [`RandomAccess`] method fails with [`InputError::Unsupported`].
///
/// Rebinding with [`input_stream`](Self::input_stream) drops whatever was
/// buffered from the previous source but keeps the buffer allocation, so
/// one instance can decode a sequence of messages from different sources.
///
/// # Example
///
/// ```rust
/// use grid_io::{DataInput, StreamInput};
///
/// let wire: &[u8] = &[0, 0, 0, 2, 0, 0, 0, 7, 0, 0, 0, 8];
/// let mut input = StreamInput::new(wire);
/// assert_eq!(input.read_int_array().unwrap(), Some(vec![7, 8]));
/// ```
#[derive(Debug)]
pub struct StreamInput<R> {
    source: R,
    buf: Vec<u8>,
    /// Next unread byte in `buf`.
    head: usize,
    /// End of valid bytes in `buf`.
    tail: usize,
    consumed: usize,
    config: InputConfig,
}

impl<R: Read> StreamInput<R> {
    /// Wrap `source` with the default configuration.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::with_config(source, InputConfig::default())
    }

    /// Wrap `source` with an explicit configuration.
    #[must_use]
    pub fn with_config(source: R, config: InputConfig) -> Self {
        Self {
            source,
            buf: vec![0u8; config.stream_buffer_size.max(1)],
            head: 0,
            tail: 0,
            consumed: 0,
            config,
        }
    }

    /// Rebind to a new source, returning the previous one.
    ///
    /// Buffered bytes of the previous source are discarded and the
    /// consumed count restarts at 0. The buffer allocation is reused.
    pub fn input_stream(&mut self, source: R) -> R {
        log::debug!(
            "rebinding stream input after {} bytes, dropping {} buffered",
            self.consumed,
            self.buffered()
        );
        self.head = 0;
        self.tail = 0;
        self.consumed = 0;
        mem::replace(&mut self.source, source)
    }

    /// The current source.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Release the current source. Buffered bytes are lost.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Bytes read from the source but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.tail - self.head
    }

    /// Refill an empty buffer from the source. Returns `false` at end of
    /// the source.
    fn fill(&mut self) -> Result<bool, InputError> {
        debug_assert_eq!(self.head, self.tail);
        self.head = 0;
        self.tail = 0;
        let n = read_retrying(&mut self.source, &mut self.buf)?;
        self.tail = n;
        Ok(n > 0)
    }

    /// Move up to `dst.len()` buffered bytes into `dst`.
    fn drain_into(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.buffered());
        dst[..n].copy_from_slice(&self.buf[self.head..self.head + n]);
        self.head += n;
        self.consumed += n;
        n
    }
}

/// One `read` call on `source`, retrying on `Interrupted`.
fn read_retrying<R: Read>(source: &mut R, dst: &mut [u8]) -> Result<usize, InputError> {
    loop {
        match source.read(dst) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

impl<R: Read> DataInput for StreamInput<R> {
    fn read_raw(&mut self) -> Result<Option<u8>, InputError> {
        if self.buffered() == 0 && !self.fill()? {
            return Ok(None);
        }
        let byte = self.buf[self.head];
        self.head += 1;
        self.consumed += 1;
        Ok(Some(byte))
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, InputError> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        if self.buffered() > 0 {
            return Ok(Some(self.drain_into(dst)));
        }
        // Large reads skip the internal buffer entirely.
        if dst.len() >= self.buf.len() {
            let n = read_retrying(&mut self.source, dst)?;
            self.consumed += n;
            return Ok((n > 0).then_some(n));
        }
        if !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.drain_into(dst)))
    }

    fn read_fully(&mut self, dst: &mut [u8]) -> Result<(), InputError> {
        let offset = self.consumed;
        let mut filled = 0;
        while filled < dst.len() {
            match self.read_into(&mut dst[filled..])? {
                Some(n) => filled += n,
                None => {
                    return Err(InputError::UnexpectedEof {
                        offset,
                        needed: dst.len(),
                    });
                }
            }
        }
        Ok(())
    }

    fn skip_bytes(&mut self, n: usize) -> Result<usize, InputError> {
        let mut skipped = 0;
        while skipped < n {
            if self.buffered() == 0 && !self.fill()? {
                break;
            }
            let step = (n - skipped).min(self.buffered());
            self.head += step;
            self.consumed += step;
            skipped += step;
        }
        Ok(skipped)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn config(&self) -> &InputConfig {
        &self.config
    }
}

fn unsupported<T>(operation: &'static str) -> Result<T, InputError> {
    Err(InputError::Unsupported { operation })
}

impl<R: Read> RandomAccess for StreamInput<R> {
    fn position(&self) -> Result<usize, InputError> {
        unsupported("position")
    }

    fn set_position(&mut self, _pos: usize) -> Result<(), InputError> {
        unsupported("set_position")
    }

    fn size(&self) -> Result<usize, InputError> {
        unsupported("size")
    }

    fn array(&self) -> Result<&[u8], InputError> {
        unsupported("array")
    }

    fn reset(&mut self) -> Result<(), InputError> {
        unsupported("reset")
    }

    fn read_byte_at(&self, _pos: usize) -> Result<i8, InputError> {
        unsupported("read_byte_at")
    }

    fn read_short_at(&self, _pos: usize) -> Result<i16, InputError> {
        unsupported("read_short_at")
    }

    fn read_int_at(&self, _pos: usize) -> Result<i32, InputError> {
        unsupported("read_int_at")
    }
}

impl<R: Read> Read for StreamInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        input::io_read(self, buf)
    }
}
