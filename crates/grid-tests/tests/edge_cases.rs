//! Edge case integration tests for the grid inputs.
//!
//! Four categories, each checked on both backends where it applies:
//!
//! - **End of input**: a truncated scalar, string or array fails with
//!   `UnexpectedEof` and never yields a partial value.
//!
//! - **Malformed prefixes**: array prefixes below -1 and prefixes above
//!   the configured cap are rejected before any allocation.
//!
//! - **Random-access surface**: bounds on `set_position` and positional
//!   reads for the buffer backend, `Unsupported` for the stream backend.
//!
//! - **Aliasing**: `array()` and `array_mut()` are the decoder's storage,
//!   not copies.
//!
//! Error messages are pinned with insta inline snapshots so a wording
//! change shows up as a reviewable diff.

use grid_io::{
    BufferInput, DataInput, GridInput, InputConfig, InputError, RandomAccess, StreamInput,
};
use grid_tests::{ChunkedReader, WireWriter};
use insta::assert_snapshot;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ── End of input ──────────────────────────────────────────────────────────────

#[test]
fn truncated_scalars_fail_on_both_backends() {
    let bytes = WireWriter::new().short(1).finish(); // 2 bytes

    let mut buffered = BufferInput::new(&bytes[..]);
    let mut streamed = StreamInput::new(ChunkedReader::new(&bytes, 1));

    assert!(buffered.read_int().unwrap_err().is_eof());
    assert!(streamed.read_long().unwrap_err().is_eof());
    assert!(buffered.read_double().unwrap_err().is_eof());
}

#[test]
fn truncated_array_never_returns_partial_elements() {
    init_logging();
    // Prefix announces 4 ints, only 2 follow.
    let bytes = WireWriter::new().int(4).int(1).int(2).finish();

    let mut buffered = BufferInput::new(&bytes[..]);
    let err = buffered.read_int_array().unwrap_err();
    assert_snapshot!(err.to_string(), @"unexpected end of input at offset 4: needed 16 bytes");

    let mut streamed = StreamInput::new(ChunkedReader::new(&bytes, 3));
    assert!(streamed.read_int_array().unwrap_err().is_eof());
}

#[test]
fn truncated_byte_array_on_stream_reports_array_start() {
    let bytes = WireWriter::new().int(10).raw(&[1, 2, 3]).finish();
    let mut streamed = StreamInput::new(ChunkedReader::new(&bytes, 2));
    assert!(matches!(
        streamed.read_byte_array(),
        Err(InputError::UnexpectedEof { offset: 4, needed: 10 })
    ));
}

#[test]
fn truncated_string_body() {
    // Length prefix says 5 bytes, body has 3.
    let bytes = WireWriter::new().short(5).raw(b"abc").finish();
    let mut input = BufferInput::new(&bytes[..]);
    let err = input.read_utf().unwrap_err();
    assert_snapshot!(err.to_string(), @"unexpected end of input at offset 2: needed 5 bytes");
}

#[test]
fn empty_input_is_eof_but_raw_read_is_sentinel() {
    let empty: &[u8] = &[];
    let mut buffered = BufferInput::new(empty);
    let mut streamed = StreamInput::new(empty);

    assert_eq!(buffered.read_raw().unwrap(), None);
    assert_eq!(streamed.read_raw().unwrap(), None);
    assert_eq!(buffered.read_into(&mut [0u8; 4]).unwrap(), None);
    assert_eq!(streamed.read_into(&mut [0u8; 4]).unwrap(), None);
    assert!(buffered.read_boolean().unwrap_err().is_eof());
    assert!(streamed.read_boolean().unwrap_err().is_eof());
}

// ── Malformed prefixes ────────────────────────────────────────────────────────

#[test]
fn negative_length_prefix_is_malformed_on_both_backends() {
    init_logging();
    let bytes = WireWriter::new().int(-7).finish();

    let err = BufferInput::new(&bytes[..]).read_long_array().unwrap_err();
    assert_snapshot!(err.to_string(), @"malformed array length -7 at offset 0");

    let err = StreamInput::new(&bytes[..]).read_long_array().unwrap_err();
    assert!(matches!(err, InputError::MalformedLength { len: -7, offset: 0 }));
}

#[test]
fn hostile_length_prefix_is_capped() {
    init_logging();
    let bytes = WireWriter::new().int(i32::MAX).finish();
    let config = InputConfig::default().with_max_array_len(1024);

    let err = StreamInput::with_config(&bytes[..], config)
        .read_double_array()
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"array length 2147483647 exceeds limit 1024");

    let err = BufferInput::with_config(&bytes[..], config)
        .read_byte_array()
        .unwrap_err();
    assert!(matches!(err, InputError::ArrayTooLong { limit: 1024, .. }));
}

#[test]
fn cap_allows_exactly_the_limit() {
    let bytes = WireWriter::new().short_array(Some(&[1, 2, 3])).finish();
    let config = InputConfig::default().with_max_array_len(3);
    let mut input = StreamInput::with_config(&bytes[..], config);
    assert_eq!(input.read_short_array().unwrap(), Some(vec![1, 2, 3]));
}

#[test]
fn lying_prefix_on_stream_fails_without_reserving_it() {
    // Default cap, 16 Mi announced, only 8 bytes follow.
    let bytes = WireWriter::new().int(16 * 1024 * 1024).long(1).finish();
    let mut input = StreamInput::new(&bytes[..]);
    assert!(input.read_long_array().unwrap_err().is_eof());
}

#[test]
fn malformed_string() {
    init_logging();
    let bytes = WireWriter::new().short(2).raw(&[0xC3, 0x28]).finish();
    let err = StreamInput::new(&bytes[..]).read_utf().unwrap_err();
    assert_snapshot!(err.to_string(), @"malformed modified UTF-8 at offset 2");
}

// ── Random-access surface ─────────────────────────────────────────────────────

#[test]
fn position_bounds() {
    let bytes = [0u8; 8];
    let mut input = BufferInput::new(&bytes[..]);
    let size = input.size().unwrap();

    for pos in [0, 1, size - 1, size] {
        input.set_position(pos).unwrap();
        assert_eq!(input.position().unwrap(), pos);
    }

    let err = input.set_position(size + 1).unwrap_err();
    assert_snapshot!(err.to_string(), @"position 9 (width 0) out of range for size 8");
    assert_eq!(input.position().unwrap(), size);
}

#[test]
fn positional_reads_do_not_move_the_cursor() {
    let bytes = WireWriter::new().int(11).int(22).int(33).finish();
    let mut input = BufferInput::new(&bytes[..]);
    assert_eq!(input.read_int().unwrap(), 11);

    for (pos, expected) in [(0, 11), (4, 22), (8, 33)] {
        assert_eq!(input.read_int_at(pos).unwrap(), expected);
        assert_eq!(input.position().unwrap(), 4);
    }
    assert_eq!(input.read_short_at(6).unwrap(), 22);
    assert_eq!(input.read_byte_at(11).unwrap(), 33);
    assert_eq!(input.read_int().unwrap(), 22);
}

#[test]
fn positional_read_past_end_is_out_of_range() {
    let bytes = WireWriter::new().int(1).finish();
    let input = BufferInput::new(&bytes[..]);
    let err = input.read_int_at(1).unwrap_err();
    assert_snapshot!(err.to_string(), @"position 1 (width 4) out of range for size 4");
    assert!(matches!(
        input.read_short_at(3),
        Err(InputError::OutOfRange { pos: 3, width: 2, size: 4 })
    ));
}

#[test]
fn stream_rejects_random_access() {
    let bytes = [0u8; 4];
    let mut input: GridInput<&[u8], &[u8]> = GridInput::wrap_stream(&bytes[..]);

    let err = input.size().unwrap_err();
    assert_snapshot!(err.to_string(), @"operation not supported by stream-backed input: size");
    assert!(matches!(input.array(), Err(InputError::Unsupported { operation: "array" })));
    assert!(matches!(input.position(), Err(InputError::Unsupported { operation: "position" })));
    assert!(matches!(input.reset(), Err(InputError::Unsupported { operation: "reset" })));
    assert!(matches!(
        input.set_position(0),
        Err(InputError::Unsupported { operation: "set_position" })
    ));
    assert!(matches!(
        input.read_byte_at(0),
        Err(InputError::Unsupported { operation: "read_byte_at" })
    ));

    // The failed calls consumed nothing.
    assert_eq!(input.read_int().unwrap(), 0);
}

#[test]
fn reset_replays_the_same_values() {
    let bytes = WireWriter::new().utf("orders").long_array(Some(&[5, 6])).finish();
    let mut input = BufferInput::new(bytes);

    let first = (input.read_utf().unwrap(), input.read_long_array().unwrap());
    input.reset().unwrap();
    let second = (input.read_utf().unwrap(), input.read_long_array().unwrap());
    assert_eq!(first, second);
}

// ── Aliasing ──────────────────────────────────────────────────────────────────

#[test]
fn array_is_a_live_alias() {
    let mut storage = WireWriter::new().int(1).int(2).finish();
    let expected_ptr = storage.as_ptr();
    let mut input = BufferInput::new(storage.as_mut_slice());

    assert_eq!(input.array().unwrap().as_ptr(), expected_ptr);
    assert_eq!(input.read_int().unwrap(), 1);

    // Patch the second int through the alias; the next decode sees it.
    input.array_mut()[4..8].copy_from_slice(&99i32.to_be_bytes());
    assert_eq!(input.read_int().unwrap(), 99);
    assert_eq!(input.read_int_at(4).unwrap(), 99);

    drop(input);
    assert_eq!(&storage[4..8], &99i32.to_be_bytes());
}

#[test]
fn decoded_arrays_do_not_alias_the_buffer() {
    let mut input = BufferInput::new(WireWriter::new().byte_array(Some(&[1, 2])).finish());
    let decoded = input.read_byte_array().unwrap().unwrap();
    input.array_mut()[4] = 0xEE;
    assert_eq!(decoded, [1, 2]);
}

// ── Rebinding ─────────────────────────────────────────────────────────────────

#[test]
fn one_stream_instance_decodes_successive_messages() {
    init_logging();
    let first = WireWriter::new().utf("msg-1").int(1).raw(&[0xAB; 7]).finish();
    let second = WireWriter::new().utf("msg-2").int(2).finish();

    let mut input = StreamInput::new(ChunkedReader::new(&first, 64));
    assert_eq!(input.read_utf().unwrap(), "msg-1");
    assert_eq!(input.read_int().unwrap(), 1);

    // Trailing bytes of the first message are dropped on rebind.
    let _ = input.input_stream(ChunkedReader::new(&second, 64));
    assert_eq!(input.read_utf().unwrap(), "msg-2");
    assert_eq!(input.read_int().unwrap(), 2);
    assert_eq!(input.read_raw().unwrap(), None);
}
