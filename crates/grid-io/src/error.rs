use std::io;

/// Errors that can occur while decoding from a [`DataInput`](crate::DataInput).
///
/// Every variant carries enough context to locate the failure in the
/// input. Offsets are counted in bytes from the start of the input
/// (buffer backend) or from the last rebind (stream backend).
///
/// ```text
///   InputError
///   ├── UnexpectedEof     ← fewer bytes remain than the read requires
///   ├── MalformedLength   ← array length prefix below the absent sentinel
///   ├── ArrayTooLong      ← length prefix above the configured cap
///   ├── Unsupported       ← random-access call on a stream-backed input
///   ├── OutOfRange        ← position or positional read outside the buffer
///   ├── MalformedUtf      ← invalid modified UTF-8 in a string
///   └── Io(std::io::Error)← the underlying source failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input ended before a complete value could be read.
    ///
    /// `offset` is where the failing read started and `needed` the
    /// number of bytes it asked for. Nothing is returned for the
    /// partially available bytes.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    /// An array length prefix was negative and not the absent sentinel (-1).
    #[error("malformed array length {len} at offset {offset}")]
    MalformedLength { len: i32, offset: usize },

    /// An array length prefix exceeded
    /// [`InputConfig::max_array_len`](crate::InputConfig::max_array_len).
    ///
    /// Raised before anything is allocated for the array.
    #[error("array length {len} exceeds limit {limit}")]
    ArrayTooLong { len: usize, limit: usize },

    /// The operation needs random access, which a stream-backed input
    /// does not have.
    #[error("operation not supported by stream-backed input: {operation}")]
    Unsupported { operation: &'static str },

    /// A position, or a `width`-byte read at `pos`, falls outside `[0, size]`.
    #[error("position {pos} (width {width}) out of range for size {size}")]
    OutOfRange { pos: usize, width: usize, size: usize },

    /// A string contained bytes that are not valid modified UTF-8.
    #[error("malformed modified UTF-8 at offset {offset}")]
    MalformedUtf { offset: usize },

    /// The underlying byte source failed. The source error is kept as is.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InputError {
    /// Returns `true` for end-of-input failures, the only kind that more
    /// input can recover from.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

impl From<InputError> for io::Error {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Io(e) => e,
            InputError::UnexpectedEof { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            InputError::Unsupported { .. } => io::Error::new(io::ErrorKind::Unsupported, err),
            InputError::OutOfRange { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            InputError::MalformedLength { .. }
            | InputError::ArrayTooLong { .. }
            | InputError::MalformedUtf { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}
