use crate::error::InputError;

/// Random-access surface of an input.
///
/// Only the buffer backend can honour these operations. The stream
/// backend implements the trait too, but every method fails with
/// [`InputError::Unsupported`], so code written against
/// [`GridDataInput`](crate::GridDataInput) gets an explicit, checked
/// failure rather than a missing method.
///
/// ```text
/// ┌────────────────────┬──────────────────┬───────────────────────┐
/// │ Operation          │ Buffer backend   │ Stream backend        │
/// ├────────────────────┼──────────────────┼───────────────────────┤
/// │ position()         │ cursor           │ Unsupported           │
/// │ set_position(pos)  │ pos ∈ [0, size]  │ Unsupported           │
/// │ size()             │ backing length   │ Unsupported           │
/// │ array()            │ live alias       │ Unsupported           │
/// │ reset()            │ cursor = 0       │ Unsupported           │
/// │ read_*_at(pos)     │ bounds-checked   │ Unsupported           │
/// └────────────────────┴──────────────────┴───────────────────────┘
/// ```
///
/// Positional reads take `&self`: they cannot move the sequential cursor.
pub trait RandomAccess {
    /// Current cursor offset.
    ///
    /// # Errors
    ///
    /// [`InputError::Unsupported`] on a stream-backed input.
    fn position(&self) -> Result<usize, InputError>;

    /// Move the cursor to `pos`.
    ///
    /// # Errors
    ///
    /// - [`InputError::OutOfRange`] if `pos > size()`.
    /// - [`InputError::Unsupported`] on a stream-backed input.
    fn set_position(&mut self, pos: usize) -> Result<(), InputError>;

    /// Total addressable length of the backing bytes.
    ///
    /// # Errors
    ///
    /// [`InputError::Unsupported`] on a stream-backed input.
    fn size(&self) -> Result<usize, InputError>;

    /// The backing bytes, by reference.
    ///
    /// This is the decoder's own storage, not a copy. Anything that
    /// changes it (see `BufferInput::array_mut`) changes what later
    /// decodes return.
    ///
    /// # Errors
    ///
    /// [`InputError::Unsupported`] on a stream-backed input.
    fn array(&self) -> Result<&[u8], InputError>;

    /// Rewind the cursor to 0. The backing bytes are left untouched.
    ///
    /// # Errors
    ///
    /// [`InputError::Unsupported`] on a stream-backed input.
    fn reset(&mut self) -> Result<(), InputError>;

    /// Read the byte at absolute offset `pos`.
    ///
    /// # Errors
    ///
    /// - [`InputError::OutOfRange`] if `pos + 1 > size()`.
    /// - [`InputError::Unsupported`] on a stream-backed input.
    fn read_byte_at(&self, pos: usize) -> Result<i8, InputError>;

    /// Read the big-endian short at absolute offset `pos`.
    ///
    /// # Errors
    ///
    /// - [`InputError::OutOfRange`] if `pos + 2 > size()`.
    /// - [`InputError::Unsupported`] on a stream-backed input.
    fn read_short_at(&self, pos: usize) -> Result<i16, InputError>;

    /// Read the big-endian int at absolute offset `pos`.
    ///
    /// # Errors
    ///
    /// - [`InputError::OutOfRange`] if `pos + 4 > size()`.
    /// - [`InputError::Unsupported`] on a stream-backed input.
    fn read_int_at(&self, pos: usize) -> Result<i32, InputError>;
}
