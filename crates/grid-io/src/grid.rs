use std::io::{self, Read};

use crate::access::RandomAccess;
use crate::buffer::BufferInput;
use crate::config::InputConfig;
use crate::error::InputError;
use crate::input::{self, DataInput};
use crate::stream::StreamInput;

/// An input bound to either backend, behind one type.
///
/// Callers pick the backend at construction and then decode through
/// [`DataInput`] and [`RandomAccess`] without caring which one they got.
/// Operations the stream backend cannot honour fail with
/// [`InputError::Unsupported`].
///
/// ```text
///   GridInput::wrap(bytes)          → Buffer(BufferInput<B>)
///   GridInput::wrap_stream(source)  → Stream(StreamInput<R>)
///   input.input_stream(source)      → Stream(..), from either state
///   input.input_bytes(bytes)        → Buffer(..), from either state
/// ```
///
/// # Example
///
/// ```rust
/// use grid_io::{DataInput, GridInput, InputError, RandomAccess};
///
/// let bytes: [u8; 4] = [0, 0, 0, 42];
///
/// let mut buffered: GridInput<_, &[u8]> = GridInput::wrap(&bytes[..]);
/// assert_eq!(buffered.read_int().unwrap(), 42);
/// assert_eq!(buffered.size().unwrap(), 4);
///
/// let mut streamed: GridInput<&[u8], _> = GridInput::wrap_stream(&bytes[..]);
/// assert_eq!(streamed.read_int().unwrap(), 42);
/// assert!(matches!(streamed.size(), Err(InputError::Unsupported { .. })));
/// ```
#[derive(Debug)]
pub enum GridInput<B, R> {
    /// Random-access decoding over in-memory bytes.
    Buffer(BufferInput<B>),
    /// Sequential decoding from an external source.
    Stream(StreamInput<R>),
}

macro_rules! dispatch {
    ($self:expr, $input:ident => $body:expr) => {
        match $self {
            GridInput::Buffer($input) => $body,
            GridInput::Stream($input) => $body,
        }
    };
}

impl<B: AsRef<[u8]>, R: Read> GridInput<B, R> {
    /// Buffer-backed input over `bytes`.
    #[must_use]
    pub fn wrap(bytes: B) -> Self {
        Self::Buffer(BufferInput::new(bytes))
    }

    /// Stream-backed input over `source`.
    #[must_use]
    pub fn wrap_stream(source: R) -> Self {
        Self::Stream(StreamInput::new(source))
    }

    /// Switch to reading from `source`.
    ///
    /// A stream-backed input is rebound in place (its buffer allocation is
    /// kept) and the previous source is returned. A buffer-backed input
    /// becomes stream-backed with the same configuration; there is no
    /// previous source to return.
    pub fn input_stream(&mut self, source: R) -> Option<R> {
        match self {
            Self::Stream(stream) => Some(stream.input_stream(source)),
            Self::Buffer(buffer) => {
                log::debug!("switching buffer input to stream mode");
                let config = *buffer.config();
                *self = Self::Stream(StreamInput::with_config(source, config));
                None
            }
        }
    }

    /// Switch to decoding `bytes`, the counterpart of
    /// [`input_stream`](Self::input_stream).
    ///
    /// A buffer-backed input is rebound in place and returns its previous
    /// backing. A stream-backed input becomes buffer-backed with the same
    /// configuration; its source is dropped and `None` is returned.
    pub fn input_bytes(&mut self, bytes: B) -> Option<B> {
        match self {
            Self::Buffer(buffer) => Some(buffer.rebind(bytes)),
            Self::Stream(stream) => {
                log::debug!("switching stream input to buffer mode");
                let config = *stream.config();
                *self = Self::Buffer(BufferInput::with_config(bytes, config));
                None
            }
        }
    }

    /// `true` if this input decodes from in-memory bytes.
    #[must_use]
    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }
}

impl<B: AsRef<[u8]>, R: Read> DataInput for GridInput<B, R> {
    fn read_raw(&mut self) -> Result<Option<u8>, InputError> {
        dispatch!(self, input => input.read_raw())
    }

    fn read_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, InputError> {
        dispatch!(self, input => input.read_into(dst))
    }

    fn read_fully(&mut self, dst: &mut [u8]) -> Result<(), InputError> {
        dispatch!(self, input => input.read_fully(dst))
    }

    fn skip_bytes(&mut self, n: usize) -> Result<usize, InputError> {
        dispatch!(self, input => input.skip_bytes(n))
    }

    fn consumed(&self) -> usize {
        dispatch!(self, input => input.consumed())
    }

    fn config(&self) -> &InputConfig {
        dispatch!(self, input => input.config())
    }

    fn remaining_hint(&self) -> Option<usize> {
        dispatch!(self, input => input.remaining_hint())
    }
}

impl<B: AsRef<[u8]>, R: Read> RandomAccess for GridInput<B, R> {
    fn position(&self) -> Result<usize, InputError> {
        dispatch!(self, input => input.position())
    }

    fn set_position(&mut self, pos: usize) -> Result<(), InputError> {
        dispatch!(self, input => input.set_position(pos))
    }

    fn size(&self) -> Result<usize, InputError> {
        dispatch!(self, input => input.size())
    }

    fn array(&self) -> Result<&[u8], InputError> {
        dispatch!(self, input => input.array())
    }

    fn reset(&mut self) -> Result<(), InputError> {
        dispatch!(self, input => input.reset())
    }

    fn read_byte_at(&self, pos: usize) -> Result<i8, InputError> {
        dispatch!(self, input => input.read_byte_at(pos))
    }

    fn read_short_at(&self, pos: usize) -> Result<i16, InputError> {
        dispatch!(self, input => input.read_short_at(pos))
    }

    fn read_int_at(&self, pos: usize) -> Result<i32, InputError> {
        dispatch!(self, input => input.read_int_at(pos))
    }
}

impl<B: AsRef<[u8]>, R: Read> Read for GridInput<B, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        input::io_read(self, buf)
    }
}
