//! Incremental `text/event-stream` decoder.
//!
//! Bytes arrive in arbitrary chunks; lines (ended by LF, CRLF or a bare CR)
//! are collected as bytes so multi-byte characters straddling a chunk
//! boundary survive.

/// Longest line kept; anything longer is dropped up to its terminator.
const MAX_LINE_BYTES: usize = 64 * 1024;

/// Accumulates stream bytes and yields the `data` payload of each finished
/// event.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data_lines: Vec<String>,
    after_cr: bool,
    discarding: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every event completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut payloads = Vec::new();
        for &byte in chunk {
            if std::mem::take(&mut self.after_cr) && byte == b'\n' {
                continue;
            }
            match byte {
                b'\n' | b'\r' => {
                    self.after_cr = byte == b'\r';
                    if std::mem::take(&mut self.discarding) {
                        continue;
                    }
                    let line = String::from_utf8_lossy(&self.buffer).into_owned();
                    self.buffer.clear();
                    if let Some(payload) = self.feed_line(&line) {
                        payloads.push(payload);
                    }
                }
                _ if self.discarding => {}
                _ if self.buffer.len() >= MAX_LINE_BYTES => {
                    tracing::warn!(limit = MAX_LINE_BYTES, "dropping oversized event-stream line");
                    self.buffer.clear();
                    self.discarding = true;
                }
                _ => self.buffer.push(byte),
            }
        }
        payloads
    }

    fn feed_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if self.data_lines.is_empty() {
                return None;
            }
            let payload = self.data_lines.join("\n");
            self.data_lines.clear();
            return Some(payload);
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data_lines.push(value.to_string());
        }
        None
    }
}
