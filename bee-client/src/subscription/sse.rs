//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes arrive in arbitrary chunks; a line (or a UTF-8 sequence) may be
//! split across two of them. Lines end with CRLF, LF or a bare CR. The
//! decoder buffers partial lines and yields the joined `data:` payload of
//! each complete event. Other fields (`event:`, `id:`, `retry:`) and `:`
//! comment lines are ignored.

use tracing::warn;

/// Longest line kept while waiting for its terminator. Anything longer is
/// dropped up to the next line break.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    // Last byte was a CR, so a following LF belongs to the same line break
    after_cr: bool,
    discarding: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the payloads of every event it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut payloads = Vec::new();

        for &byte in chunk {
            if std::mem::take(&mut self.after_cr) && byte == b'\n' {
                continue;
            }

            match byte {
                b'\n' => self.end_line(&mut payloads),
                b'\r' => {
                    self.after_cr = true;
                    self.end_line(&mut payloads);
                }
                _ if self.discarding => {}
                _ if self.buffer.len() >= MAX_LINE_BYTES => {
                    warn!("Dropping event-stream line longer than {} bytes", MAX_LINE_BYTES);
                    self.buffer.clear();
                    self.discarding = true;
                }
                _ => self.buffer.push(byte),
            }
        }
        payloads
    }

    fn end_line(&mut self, payloads: &mut Vec<String>) {
        if std::mem::take(&mut self.discarding) {
            return;
        }

        let line = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();

        if line.is_empty() {
            if !self.data.is_empty() {
                payloads.push(self.data.join("\n"));
                self.data.clear();
            }
            return;
        }

        if let Some(value) = parse_data_line(&line) {
            self.data.push(value.to_string());
        }
    }
}

/// Value of a `data:` line, with the single optional leading space removed.
fn parse_data_line(line: &str) -> Option<&str> {
    let value = line.strip_prefix("data:")?;
    Some(value.strip_prefix(' ').unwrap_or(value))
}
