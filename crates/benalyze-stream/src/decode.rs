//! Incremental stream decoding
//!
//! Two layers, both holding state across reads:
//! - [`Utf8Decoder`] reassembles multi-byte characters split across chunk
//!   boundaries. This is a correctness requirement: the backend chunks its
//!   response at arbitrary byte offsets.
//! - [`FrameDecoder`] splits decoded text into lines, keeps only lines with
//!   the literal event-data prefix, and parses each candidate into a
//!   [`StreamFrame`]. A malformed candidate is a logged warning, never a
//!   session failure.

use benalyze_event::StreamFrame;

/// Literal prefix carried by every significant stream line
pub const EVENT_DATA_PREFIX: &str = "data: ";

/// Incremental UTF-8 decoder carrying partial multi-byte state across reads
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Undecoded tail of the previous chunk (at most one partial character)
    partial: Vec<u8>,
}

impl Utf8Decoder {
    /// Create new decoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, yielding all complete characters
    ///
    /// An incomplete multi-byte sequence at the end of the chunk is retained
    /// and completed by the next call. An invalid (not merely incomplete)
    /// sequence is replaced with U+FFFD and skipped so one bad byte cannot
    /// wedge the stream.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.partial.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.partial.len());
        loop {
            match std::str::from_utf8(&self.partial) {
                Ok(text) => {
                    out.push_str(text);
                    self.partial.clear();
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&self.partial[..valid]) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        // Incomplete tail: keep it for the next chunk
                        None => {
                            self.partial.drain(..valid);
                            break;
                        }
                        // Invalid sequence: replace and continue past it
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.partial.drain(..valid + len);
                        }
                    }
                }
            }
        }
        out
    }

    /// Check whether a partial character is pending
    #[inline]
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.partial.is_empty()
    }
}

/// Incremental frame extractor over a byte stream
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8Decoder,
    /// Text of the current, not yet newline-terminated line
    line_buf: String,
    parse_warnings: usize,
}

impl FrameDecoder {
    /// Create new decoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk, returning all frames completed by it
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        let text = self.utf8.decode(chunk);
        self.line_buf.push_str(&text);

        let mut frames = Vec::new();
        while let Some(pos) = self.line_buf.find('\n') {
            let line: String = self.line_buf.drain(..=pos).collect();
            if let Some(frame) = self.parse_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush a trailing line left without a final newline
    pub fn finish(&mut self) -> Option<StreamFrame> {
        if self.line_buf.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.line_buf);
        self.parse_line(&line)
    }

    /// Number of malformed candidate lines skipped so far
    #[inline]
    #[must_use]
    pub fn parse_warnings(&self) -> usize {
        self.parse_warnings
    }

    /// Parse one line; non-candidates and malformed candidates yield `None`
    fn parse_line(&mut self, line: &str) -> Option<StreamFrame> {
        let line = line.trim_end_matches(['\r', '\n']);
        let payload = line.strip_prefix(EVENT_DATA_PREFIX)?;

        match serde_json::from_str(payload) {
            Ok(frame) => Some(frame),
            Err(err) => {
                self.parse_warnings += 1;
                tracing::warn!(%err, line = payload, "skipping malformed stream line");
                None
            }
        }
    }
}
