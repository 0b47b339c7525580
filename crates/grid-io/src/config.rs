/// Default cap on the element count of a single decoded array (16 Mi).
pub const DEFAULT_MAX_ARRAY_LEN: usize = 16 * 1024 * 1024;

/// Default size of the stream backend's internal read buffer (8 KiB).
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration shared by both input backends.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────┐
/// │ Field              │ Purpose                                      │
/// ├────────────────────┼──────────────────────────────────────────────┤
/// │ max_array_len      │ Largest element count an array prefix may    │
/// │                    │ announce before decoding is refused          │
/// │ stream_buffer_size │ Bytes pulled from the source per refill      │
/// │                    │ (stream backend only)                        │
/// └────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// The array cap bounds the only allocation whose size comes from the
/// input itself. A corrupt or hostile length prefix fails with
/// [`InputError::ArrayTooLong`](crate::InputError::ArrayTooLong) instead
/// of driving the process out of memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputConfig {
    /// Maximum element count accepted from an array length prefix.
    pub max_array_len: usize,

    /// Capacity of the stream backend's refill buffer. Values below 1
    /// are treated as 1.
    pub stream_buffer_size: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
        }
    }
}

impl InputConfig {
    /// Return a copy with a different array cap.
    #[must_use]
    pub fn with_max_array_len(mut self, max_array_len: usize) -> Self {
        self.max_array_len = max_array_len;
        self
    }

    /// Return a copy with a different stream buffer size.
    #[must_use]
    pub fn with_stream_buffer_size(mut self, stream_buffer_size: usize) -> Self {
        self.stream_buffer_size = stream_buffer_size;
        self
    }
}
