use crate::error::InputError;
use crate::input::DataInput;

/// Length prefix marking an absent array, as opposed to an empty one.
pub const ABSENT_LEN: i32 = -1;

/// Upper bound on capacity reserved up front when the backend cannot
/// confirm that the announced elements are actually there.
const UNCONFIRMED_PREALLOC: usize = 4096;

/// A fixed-width primitive that can appear in a length-prefixed array.
///
/// ```text
/// ┌──────┬─────────┬───────┐
/// │ Type │ Wire    │ Width │
/// ├──────┼─────────┼───────┤
/// │ u8   │ byte    │ 1     │
/// │ i8   │ byte    │ 1     │
/// │ bool │ boolean │ 1     │
/// │ i16  │ short   │ 2     │
/// │ u16  │ char    │ 2     │
/// │ i32  │ int     │ 4     │
/// │ f32  │ float   │ 4     │
/// │ i64  │ long    │ 8     │
/// │ f64  │ double  │ 8     │
/// └──────┴─────────┴───────┘
/// ```
pub trait Element: Sized {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Decode one element at the input's cursor.
    ///
    /// # Errors
    ///
    /// Whatever the underlying scalar read fails with.
    fn read_from<I: DataInput + ?Sized>(input: &mut I) -> Result<Self, InputError>;

    /// Decode `len` elements into `out`, in encoding order.
    ///
    /// # Errors
    ///
    /// Whatever the underlying scalar reads fail with.
    fn read_many<I: DataInput + ?Sized>(
        input: &mut I,
        len: usize,
        out: &mut Vec<Self>,
    ) -> Result<(), InputError> {
        for _ in 0..len {
            out.push(Self::read_from(input)?);
        }
        Ok(())
    }
}

macro_rules! element {
    ($ty:ty, $width:expr, $read:ident) => {
        impl Element for $ty {
            const WIDTH: usize = $width;

            fn read_from<I: DataInput + ?Sized>(input: &mut I) -> Result<Self, InputError> {
                input.$read()
            }
        }
    };
}

element!(i8, 1, read_byte);
element!(bool, 1, read_boolean);
element!(i16, 2, read_short);
element!(u16, 2, read_char);
element!(i32, 4, read_int);
element!(i64, 8, read_long);
element!(f32, 4, read_float);
element!(f64, 8, read_double);

impl Element for u8 {
    const WIDTH: usize = 1;

    fn read_from<I: DataInput + ?Sized>(input: &mut I) -> Result<Self, InputError> {
        input.read_unsigned_byte()
    }

    // Bytes need no per-element conversion, so copy them in bulk.
    fn read_many<I: DataInput + ?Sized>(
        input: &mut I,
        len: usize,
        out: &mut Vec<Self>,
    ) -> Result<(), InputError> {
        let start = input.consumed();
        let mut filled = 0;
        while filled < len {
            // Grow at most one chunk past what is already reserved.
            let chunk = (len - filled).min((out.capacity() - filled).max(UNCONFIRMED_PREALLOC));
            out.resize(filled + chunk, 0);
            input.read_fully(&mut out[filled..]).map_err(|e| match e {
                InputError::UnexpectedEof { .. } => InputError::UnexpectedEof {
                    offset: start,
                    needed: len,
                },
                other => other,
            })?;
            filled += chunk;
        }
        Ok(())
    }
}

/// Decode a length-prefixed array.
///
/// Layout: a big-endian `i32` element count followed by that many
/// fixed-width elements. The result is three-way:
///
/// ```text
///   prefix == -1   → Ok(None)            absent
///   prefix ==  0   → Ok(Some(vec![]))    present, empty
///   prefix ==  N   → Ok(Some(N elems))   populated
///   prefix <  -1   → Err(MalformedLength)
/// ```
///
/// The prefix is checked against
/// [`InputConfig::max_array_len`](crate::InputConfig::max_array_len)
/// before anything is allocated. When the backend knows how many bytes
/// remain, a prefix the input cannot satisfy fails with
/// [`InputError::UnexpectedEof`] straight away; otherwise the result grows
/// as elements arrive so a lying prefix cannot force a huge allocation.
///
/// On success exactly `4 + N * T::WIDTH` bytes are consumed.
///
/// # Errors
///
/// - [`InputError::MalformedLength`] for a prefix below -1.
/// - [`InputError::ArrayTooLong`] for a prefix above the configured cap.
/// - [`InputError::UnexpectedEof`] if the input ends before N elements.
/// - [`InputError::Io`] from the underlying source.
pub fn read_array<T: Element, I: DataInput + ?Sized>(
    input: &mut I,
) -> Result<Option<Vec<T>>, InputError> {
    let prefix_offset = input.consumed();
    let prefix = input.read_int()?;

    if prefix == ABSENT_LEN {
        return Ok(None);
    }

    let Ok(len) = usize::try_from(prefix) else {
        log::warn!("malformed array length {prefix} at offset {prefix_offset}");
        return Err(InputError::MalformedLength {
            len: prefix,
            offset: prefix_offset,
        });
    };

    let limit = input.config().max_array_len;
    if len > limit {
        log::warn!("array length {len} at offset {prefix_offset} exceeds limit {limit}");
        return Err(InputError::ArrayTooLong { len, limit });
    }

    let needed = len.saturating_mul(T::WIDTH);
    let capacity = match input.remaining_hint() {
        Some(remaining) if remaining < needed => {
            return Err(InputError::UnexpectedEof {
                offset: input.consumed(),
                needed,
            });
        }
        Some(_) => len,
        None => len.min(UNCONFIRMED_PREALLOC),
    };

    let mut out = Vec::with_capacity(capacity);
    T::read_many(input, len, &mut out)?;
    Ok(Some(out))
}
