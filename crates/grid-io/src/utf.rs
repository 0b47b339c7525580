/// Decode a modified UTF-8 body into a `String`.
///
/// Returns the byte offset (relative to `bytes`) of the first malformed
/// sequence on failure. A surrogate pair is only valid as two consecutive
/// 3-byte sequences; an unpaired surrogate is reported at its own offset.
pub(crate) fn decode_modified_utf8(bytes: &[u8]) -> Result<String, usize> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    // Byte offset each code unit started at, for error reporting.
    let mut starts: Vec<usize> = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        let (unit, width) = match b0 >> 4 {
            0..=7 => (u16::from(b0), 1),
            12 | 13 => {
                let b1 = continuation(bytes, i, 1)?;
                ((u16::from(b0 & 0x1F) << 6) | u16::from(b1 & 0x3F), 2)
            }
            14 => {
                let b1 = continuation(bytes, i, 1)?;
                let b2 = continuation(bytes, i, 2)?;
                (
                    (u16::from(b0 & 0x0F) << 12)
                        | (u16::from(b1 & 0x3F) << 6)
                        | u16::from(b2 & 0x3F),
                    3,
                )
            }
            _ => return Err(i),
        };
        units.push(unit);
        starts.push(i);
        i += width;
    }

    let mut out = String::with_capacity(units.len());
    let mut unit_index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                out.push(c);
                unit_index += c.len_utf16();
            }
            Err(_) => return Err(starts[unit_index]),
        }
    }
    Ok(out)
}

/// Fetch the continuation byte `i + k` of the sequence starting at `i`.
fn continuation(bytes: &[u8], i: usize, k: usize) -> Result<u8, usize> {
    match bytes.get(i + k) {
        Some(&b) if b & 0xC0 == 0x80 => Ok(b),
        _ => Err(i),
    }
}
