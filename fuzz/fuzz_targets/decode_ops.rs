#![no_main]

use grid_io::{BufferInput, DataInput, RandomAccess};
use libfuzzer_sys::fuzz_target;

// Fuzz target: drive a buffer input over arbitrary bytes.
//
// Each input byte picks the next decode call; the rest of the input is
// the payload. Catches bugs in:
// - Length prefix validation (negative, oversized, lying prefixes)
// - Modified UTF-8 decoding of garbage
// - Cursor arithmetic near the end of the buffer
// - Positional reads at arbitrary offsets
fuzz_target!(|data: &[u8]| {
    let Some((&op_count, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(op_count).min(rest.len());
    let (ops, payload) = rest.split_at(split);

    let mut input = BufferInput::new(payload);
    for &op in ops {
        let before = input.position().unwrap();
        let ok = match op % 12 {
            0 => input.read_byte().is_ok(),
            1 => input.read_short().is_ok(),
            2 => input.read_int().is_ok(),
            3 => input.read_long().is_ok(),
            4 => input.read_double().is_ok(),
            5 => input.read_utf().is_ok(),
            6 => input.read_byte_array().is_ok(),
            7 => input.read_int_array().is_ok(),
            8 => input.read_char_array().is_ok(),
            9 => input.skip_bytes(usize::from(op)).is_ok(),
            10 => input.read_int_at(usize::from(op)).is_ok(),
            _ => input.set_position(usize::from(op)).is_ok(),
        };
        let after = input.position().unwrap();
        assert!(after <= payload.len());
        assert_eq!(input.consumed(), after);
        if !ok && op % 12 < 5 {
            // Fixed-width reads check before consuming.
            assert_eq!(before, after);
        }
    }
});
