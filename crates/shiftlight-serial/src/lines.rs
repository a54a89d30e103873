//! Line assembly for device responses
//!
//! The device answers with newline terminated ASCII lines. Bytes arrive in
//! arbitrary chunks, so they are buffered here until a full line is present.
//! Bytes after the last newline stay buffered for the next read.

/// Buffer that turns received byte chunks into lines
#[derive(Debug, Default)]
pub struct LineReader {
    buf: Vec<u8>,
}

impl LineReader {
    /// Create an empty reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes
    pub fn push(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Take the next complete line, trimmed of surrounding whitespace
    ///
    /// Trimming removes the `\r` of CRLF terminated lines.
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.buf.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=end).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Text received after the last complete line, trimmed
    pub fn partial(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim().to_string()
    }

    /// Remove everything buffered and return it as text, trimmed
    pub fn take(&mut self) -> String {
        let text = self.partial();
        self.buf.clear();
        text
    }

    /// Whether no bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Whether a received line is a device comment that carries no protocol meaning
pub fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}
