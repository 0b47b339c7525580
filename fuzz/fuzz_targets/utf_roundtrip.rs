#![no_main]

use grid_io::{BufferInput, DataInput, StreamInput};
use grid_tests::{encode_modified_utf8, WireWriter};
use libfuzzer_sys::fuzz_target;

// Fuzz target: modified UTF-8 encode->decode roundtrip.
//
// Any string whose encoding fits a u16 prefix must decode back to
// itself on both backends and consume exactly prefix + body.
fuzz_target!(|value: String| {
    let body_len = encode_modified_utf8(&value).len();
    if body_len > usize::from(u16::MAX) {
        return;
    }
    let bytes = WireWriter::new().utf(&value).finish();

    let mut buffered = BufferInput::new(&bytes[..]);
    assert_eq!(buffered.read_utf().unwrap(), value);
    assert_eq!(buffered.consumed(), 2 + body_len);

    let mut streamed = StreamInput::new(&bytes[..]);
    assert_eq!(streamed.read_utf().unwrap(), value);
    assert_eq!(streamed.consumed(), 2 + body_len);
});
