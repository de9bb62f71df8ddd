//! Splits a buffered line in place into typed fields.

use crate::line_buffer::{FieldKind, LineBuffer, MAX_CHARS, MAX_FIELDS};

/// Scan the buffer left to right, recording up to [`MAX_FIELDS`] fields.
///
/// A field begins at the first alphanumeric byte following a delimiter (or
/// at offset 0). Its kind is decided once, from that first byte; the rest of
/// the maximal alphanumeric run is consumed as part of the field regardless
/// of class. Every delimiter byte is overwritten with NUL so each field is
/// readable as an independent terminated string. The scan stops at the first
/// NUL, at the end of the buffer, or when a sixth field would start (the
/// field table must never overflow).
pub fn tokenize(data: &mut LineBuffer) {
    data.field_count = 0;
    let mut prev_delim = true;
    for i in 0..MAX_CHARS {
        let byte = data.buffer[i];
        if byte == 0 {
            break;
        }
        match classify(byte) {
            Some(kind) if prev_delim => {
                if data.field_count == MAX_FIELDS {
                    break;
                }
                data.field_position[data.field_count] = i;
                data.field_kind[data.field_count] = kind;
                data.field_count += 1;
                prev_delim = false;
            }
            Some(_) => {}
            None => {
                prev_delim = true;
                data.buffer[i] = 0;
            }
        }
    }
}

fn classify(byte: u8) -> Option<FieldKind> {
    match byte {
        b'a'..=b'z' => Some(FieldKind::LowerAlpha),
        b'A'..=b'Z' => Some(FieldKind::UpperAlpha),
        b'0'..=b'9' => Some(FieldKind::Numeric),
        _ => None,
    }
}
