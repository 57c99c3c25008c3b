//! Incremental SSE frame decoder.
//!
//! Network chunks arrive at arbitrary boundaries. [`FrameDecoder`] keeps one
//! growing text buffer per stream, extracts complete `\n`-terminated lines and
//! hands the JSON payload of each `data: ` line downstream:
//!
//! ```text
//! event: content_block_delta
//! data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}
//!
//! data: [DONE]
//! ```
//!
//! Blank lines, `:` comments and `event:` lines carry nothing we need and are
//! dropped. A `[DONE]` payload ends the stream; later input is ignored.
//!
//! A data line whose payload does not parse as JSON is pushed back onto the
//! front of the buffer (with its line feed) and decoding stops until the next
//! chunk arrives.

use serde_json::Value;

const DATA_PREFIX: &str = "data: ";
const EVENT_PREFIX: &str = "event: ";
const COMMENT_PREFIX: char = ':';
const DONE_SENTINEL: &str = "[DONE]";

/// Per-stream decoder state. Create one per response body; never share.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    utf8_tail: Vec<u8>,
    finished: bool,
}

impl FrameDecoder {
    /// A decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text waiting for a line terminator (or for a retry after a rewind).
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Append a text chunk and lazily iterate the payloads it completes.
    pub fn push(&mut self, chunk: &str) -> Frames<'_> {
        if !self.finished {
            self.buffer.push_str(chunk);
        }
        Frames {
            decoder: self,
            halted: false,
        }
    }

    /// Append a raw byte chunk. A UTF-8 sequence split across chunks is held
    /// back until its remaining bytes arrive; invalid bytes become U+FFFD.
    pub fn push_bytes(&mut self, chunk: &[u8]) -> Frames<'_> {
        let text = self.decode_utf8(chunk);
        self.push(&text)
    }

    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        self.utf8_tail.extend_from_slice(chunk);
        let mut text = String::new();
        loop {
            match std::str::from_utf8(&self.utf8_tail) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.utf8_tail.clear();
                    return text;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.utf8_tail[..valid_up_to]));
                    match err.error_len() {
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            self.utf8_tail.drain(..valid_up_to);
                            return text;
                        }
                        Some(bad) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.utf8_tail.drain(..valid_up_to + bad);
                        }
                    }
                }
            }
        }
    }

    fn next_step(&mut self) -> Step {
        loop {
            if self.finished {
                return Step::Halt;
            }
            let Some(newline) = self.buffer.find('\n') else {
                return Step::Halt;
            };
            let raw: String = self.buffer.drain(..=newline).collect();
            let line = raw[..newline].strip_suffix('\r').unwrap_or(&raw[..newline]);

            if line.trim().is_empty()
                || line.starts_with(COMMENT_PREFIX)
                || line.starts_with(EVENT_PREFIX)
            {
                continue;
            }
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let payload = payload.trim();
            if payload == DONE_SENTINEL {
                self.finished = true;
                self.buffer.clear();
                return Step::Halt;
            }

            match serde_json::from_str::<Value>(payload) {
                Ok(value) => return Step::Payload(value),
                Err(err) => {
                    tracing::debug!(error = %err, "incomplete SSE payload, re-buffering");
                    let mut rewound = String::with_capacity(line.len() + 1 + self.buffer.len());
                    rewound.push_str(line);
                    rewound.push('\n');
                    rewound.push_str(&self.buffer);
                    self.buffer = rewound;
                    return Step::Halt;
                }
            }
        }
    }
}

enum Step {
    Payload(Value),
    Halt,
}

/// Lazy iterator over the JSON payloads completed by one pushed chunk.
///
/// Stops at the first line that is incomplete, unparseable or `[DONE]`;
/// anything left stays buffered for the next push.
pub struct Frames<'a> {
    decoder: &'a mut FrameDecoder,
    halted: bool,
}

impl Iterator for Frames<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.halted {
            return None;
        }
        match self.decoder.next_step() {
            Step::Payload(value) => Some(value),
            Step::Halt => {
                self.halted = true;
                None
            }
        }
    }
}
