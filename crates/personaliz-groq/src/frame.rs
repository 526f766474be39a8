//! Decoding of the upstream event stream.
//!
//! The body is a sequence of newline-delimited frames. Only `data:` frames
//! matter; their payload is either the `[DONE]` sentinel or a JSON chunk
//! carrying an incremental `choices[0].delta.content`.

use crate::types::StreamPayload;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// Meaning of one upstream frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Blank line, comment, non-data field, malformed JSON or empty delta.
    Skip,
    /// Upstream finished; nothing after this frame is read.
    Done,
    /// Next non-empty text fragment.
    Delta(String),
}

/// Classify a single line of the upstream body.
pub fn parse_frame(line: &str) -> Frame {
    let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    let raw = rest.trim();
    if raw == DONE_SENTINEL {
        return Frame::Done;
    }

    let Ok(payload) = serde_json::from_str::<StreamPayload>(raw) else {
        return Frame::Skip;
    };

    match payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
    {
        Some(content) if !content.is_empty() => Frame::Delta(content),
        _ => Frame::Skip,
    }
}

/// Accumulates body chunks and hands out complete lines.
///
/// Bytes are kept until a newline arrives so multi-byte characters split
/// across chunks decode correctly.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk of the body.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Next complete line, without its terminator.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Whatever is left once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.pending);
        let text = String::from_utf8_lossy(&line);
        Some(text.trim_end_matches('\r').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame() {
        assert_eq!(parse_frame(""), Frame::Skip);
        assert_eq!(parse_frame(": keep-alive"), Frame::Skip);
        assert_eq!(parse_frame("event: message"), Frame::Skip);
        assert_eq!(parse_frame("data: [DONE]"), Frame::Done);
        assert_eq!(parse_frame("data:[DONE]"), Frame::Done);
        assert_eq!(
            parse_frame(r#"data: {"choices":[{"delta":{"content":"hello"}}]}"#),
            Frame::Delta("hello".to_string())
        );
    }

    #[test]
    fn test_parse_frame_skips_malformed_and_empty() {
        assert_eq!(parse_frame("data: {not json"), Frame::Skip);
        assert_eq!(parse_frame(r#"data: {"choices":[]}"#), Frame::Skip);
        assert_eq!(
            parse_frame(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            Frame::Skip
        );
        assert_eq!(
            parse_frame(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            Frame::Skip
        );
        assert_eq!(
            parse_frame(r#"data: {"choices":[{"delta":{"content":null}}]}"#),
            Frame::Skip
        );
    }

    #[test]
    fn test_line_buffer_across_chunks() {
        let mut buffer = LineBuffer::default();
        buffer.extend(b"data: a\r\nda");
        assert_eq!(buffer.next_line().as_deref(), Some("data: a"));
        assert_eq!(buffer.next_line(), None);

        buffer.extend(b"ta: b\n\n");
        assert_eq!(buffer.next_line().as_deref(), Some("data: b"));
        assert_eq!(buffer.next_line().as_deref(), Some(""));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_line_buffer_keeps_split_utf8() {
        let bytes = "data: héllo\n".as_bytes();
        let split = 8; // inside the two-byte 'é'
        let mut buffer = LineBuffer::default();
        buffer.extend(&bytes[..split]);
        assert_eq!(buffer.next_line(), None);
        buffer.extend(&bytes[split..]);
        assert_eq!(buffer.next_line().as_deref(), Some("data: héllo"));
    }

    #[test]
    fn test_line_buffer_finish_returns_tail() {
        let mut buffer = LineBuffer::default();
        buffer.extend(b"data: [DONE]");
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.finish().as_deref(), Some("data: [DONE]"));
        assert_eq!(buffer.finish(), None);
    }
}
