#![no_main]

use arbitrary::Arbitrary;
use grid_io::{BufferInput, DataInput, InputConfig, InputError, StreamInput};
use grid_tests::ChunkedReader;
use libfuzzer_sys::fuzz_target;

// Fuzz target: buffer and stream backends must decode identically.
//
// Runs the same sequence of reads over the same bytes through both
// backends, with arbitrary source chunking and refill buffer size on the
// stream side. Values must match exactly (floats bit for bit); on the
// first error both sides must fail with the same error kind.

#[derive(Debug, Arbitrary)]
enum Op {
    Byte,
    Boolean,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Utf,
    ByteArray,
    ShortArray,
    IntArray,
    LongArray,
    DoubleArray,
    Skip(u8),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    ops: Vec<Op>,
    payload: Vec<u8>,
    chunk: u8,
    buffer_size: u8,
    max_array_len: u16,
}

#[derive(Debug, PartialEq)]
enum Value {
    Int(i64),
    Bits(u64),
    Text(String),
    Bytes(Option<Vec<u8>>),
    Ints(Option<Vec<i64>>),
    Skipped(usize),
}

fn widen<T: Into<i64>>(values: Option<Vec<T>>) -> Value {
    Value::Ints(values.map(|v| v.into_iter().map(Into::into).collect()))
}

fn apply(input: &mut dyn DataInput, op: &Op) -> Result<Value, InputError> {
    Ok(match op {
        Op::Byte => Value::Int(input.read_byte()?.into()),
        Op::Boolean => Value::Int(input.read_boolean()?.into()),
        Op::Short => Value::Int(input.read_short()?.into()),
        Op::Char => Value::Int(input.read_char()?.into()),
        Op::Int => Value::Int(input.read_int()?.into()),
        Op::Long => Value::Int(input.read_long()?),
        Op::Float => Value::Bits(input.read_float()?.to_bits().into()),
        Op::Double => Value::Bits(input.read_double()?.to_bits()),
        Op::Utf => Value::Text(input.read_utf()?),
        Op::ByteArray => Value::Bytes(input.read_byte_array()?),
        Op::ShortArray => widen(input.read_short_array()?),
        Op::IntArray => widen(input.read_int_array()?),
        Op::LongArray => widen(input.read_long_array()?),
        Op::DoubleArray => Value::Ints(
            input
                .read_double_array()?
                .map(|v| v.into_iter().map(|d| d.to_bits() as i64).collect()),
        ),
        Op::Skip(n) => Value::Skipped(input.skip_bytes(usize::from(*n))?),
    })
}

fuzz_target!(|fuzz: FuzzInput| {
    let config = InputConfig::default()
        .with_max_array_len(usize::from(fuzz.max_array_len))
        .with_stream_buffer_size(usize::from(fuzz.buffer_size));

    let mut buffered = BufferInput::with_config(&fuzz.payload[..], config);
    let mut streamed = StreamInput::with_config(
        ChunkedReader::new(&fuzz.payload, usize::from(fuzz.chunk)),
        config,
    );

    for op in &fuzz.ops {
        let left = apply(&mut buffered, op);
        let right = apply(&mut streamed, op);
        match (left, right) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b, "{op:?}");
                assert_eq!(buffered.consumed(), streamed.consumed());
            }
            (Err(a), Err(b)) => {
                assert_eq!(std::mem::discriminant(&a), std::mem::discriminant(&b));
                return;
            }
            (a, b) => panic!("backends disagree on {op:?}: {a:?} vs {b:?}"),
        }
    }
});
