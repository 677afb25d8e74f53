//! Incremental framing of `data: <payload>` lines out of a raw byte stream.
//!
//! Upstream chunks arrive at arbitrary boundaries: a chunk may end in the
//! middle of a line or in the middle of a multi-byte UTF-8 sequence. Lines
//! are framed on raw bytes first (a multi-byte sequence never contains
//! `\n`), so partial sequences simply stay buffered until the next read.

/// Accumulates raw bytes and yields complete newline-terminated lines.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete line, without its trailing `\n` (and `\r`, if any).
    /// Returns `None` until a full line is buffered.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buf.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }
}

/// Extracts the payload of a `data: <payload>` event line.
///
/// Returns `None` for anything else (empty keep-alive lines, comments,
/// other SSE fields) and for lines that are not valid UTF-8.
pub(crate) fn data_payload(line: &[u8]) -> Option<&str> {
    let line = std::str::from_utf8(line).ok()?;
    let payload = line.strip_prefix("data:")?;
    Some(payload.strip_prefix(' ').unwrap_or(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_lines_as_they_complete() {
        let mut buf = LineBuffer::default();
        buf.extend(b"data: a\ndata: b");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: a"[..]));
        assert_eq!(buf.next_line(), None);
        buf.extend(b"\n");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: b"[..]));
    }

    #[test]
    fn carries_partial_utf8_sequences_across_reads() {
        // "á" is 0xC3 0xA1; split the sequence across two reads.
        let mut buf = LineBuffer::default();
        buf.extend(b"data: Ol\xc3");
        assert_eq!(buf.next_line(), None);
        buf.extend(b"\xa1\n");
        let line = buf.next_line().unwrap();
        assert_eq!(data_payload(&line), Some("Olá"));
    }

    #[test]
    fn strips_carriage_returns() {
        let mut buf = LineBuffer::default();
        buf.extend(b"data: x\r\n");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: x"[..]));
    }

    #[test]
    fn non_data_lines_have_no_payload() {
        assert_eq!(data_payload(b""), None);
        assert_eq!(data_payload(b": keep-alive"), None);
        assert_eq!(data_payload(b"event: message"), None);
        assert_eq!(data_payload(b"\xff\xfe"), None);
    }

    #[test]
    fn payload_space_after_colon_is_optional() {
        assert_eq!(data_payload(b"data: [DONE]"), Some("[DONE]"));
        assert_eq!(data_payload(b"data:[DONE]"), Some("[DONE]"));
    }
}
