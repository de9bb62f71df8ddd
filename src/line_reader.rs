//! Reads one operator line from a transport, byte at a time.

use anyhow::Result;

use crate::line_buffer::{LineBuffer, MAX_CHARS};
use crate::transport::Transport;

/// Accumulate bytes into `data` until a return byte (13) is seen or the
/// buffer reaches capacity. Backspace (8 or 127) removes the most recently
/// buffered byte and is a no-op on an empty buffer. Other bytes below 32 are
/// silently discarded, so malformed content is impossible to represent.
///
/// Returns `false` when the transport closes before a line is produced;
/// any partial content is discarded.
pub fn read_line(transport: &mut dyn Transport, data: &mut LineBuffer) -> Result<bool> {
    loop {
        let byte = match transport.read_byte()? {
            Some(byte) => byte,
            None => return Ok(false),
        };
        match byte {
            13 => return Ok(true),
            8 | 127 => data.pop(),
            b if b >= 32 => {
                data.push(b);
                if data.len() == MAX_CHARS {
                    return Ok(true);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn read_one(script: &str) -> (bool, LineBuffer) {
        let mut transport = MockTransport::script(script);
        let mut data = LineBuffer::new();
        let produced = read_line(&mut transport, &mut data).unwrap();
        (produced, data)
    }

    // Tokenize a copy so the buffered text can be inspected as words.
    fn text(data: &LineBuffer) -> String {
        let mut copy = LineBuffer::new();
        copy.buffer = data.buffer;
        copy.len = data.len;
        crate::tokenizer::tokenize(&mut copy);
        copy.fields().map(|(_, t)| t.to_string()).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_plain_line() {
        let (produced, data) = read_one("forward 10\n");
        assert!(produced);
        assert_eq!(data.len(), 10);
        assert_eq!(text(&data), "forward 10");
    }

    #[test]
    fn test_backspace_edits() {
        let (produced, data) = read_one("cwq\x08 90\n");
        assert!(produced);
        assert_eq!(text(&data), "cw 90");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let (produced, data) = read_one("\x08\x08stop\n");
        assert!(produced);
        assert_eq!(text(&data), "stop");
    }

    #[test]
    fn test_control_bytes_discarded() {
        let (produced, data) = read_one("li\x07\x1bst\n");
        assert!(produced);
        assert_eq!(text(&data), "list");
    }

    #[test]
    fn test_line_capped_at_max_chars() {
        let long = "a".repeat(MAX_CHARS + 5);
        let mut transport = MockTransport::script(&format!("{}\n", long));
        let mut data = LineBuffer::new();
        assert!(read_line(&mut transport, &mut data).unwrap());
        assert_eq!(data.len(), MAX_CHARS);

        // The overflow bytes and the return are still queued for the next read.
        let mut next = LineBuffer::new();
        assert!(read_line(&mut transport, &mut next).unwrap());
        assert_eq!(next.len(), 5);
    }

    #[test]
    fn test_closed_transport_returns_false() {
        let (produced, data) = read_one("for");
        assert!(!produced);
        assert_eq!(data.len(), 3); // partial content, caller discards
    }
}
