//! Scripted in-memory transport
//!
//! [`MockTransport`] plays the device side of the protocol from a script:
//! bytes delivered when the port opens, then one reply released for every
//! complete line the host writes. It records what was written and how often
//! the port was opened and closed, which makes it usable for testing code
//! built on [`Transport`] without hardware.
//!
//! ```
//! use shiftlight_serial::{MockTransport, Transport};
//!
//! let mut mock = MockTransport::new().on_open("READY\n").reply("OK\n");
//! mock.open(9600)?;
//! mock.write(b"HELLO\n")?;
//! let mut buf = [0u8; 16];
//! let n = mock.read_available(&mut buf)?;
//! assert_eq!(&buf[..n], b"READY\nOK\n");
//! assert_eq!(mock.written(), ["HELLO"]);
//! # Ok::<(), shiftlight_serial::SessionError>(())
//! ```

use std::collections::VecDeque;

use crate::error::{Result, SessionError};
use crate::transport::Transport;

/// In-memory transport driven by a response script
#[derive(Debug, Default)]
pub struct MockTransport {
    on_open: Vec<u8>,
    replies: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
    pending_write: Vec<u8>,
    written: Vec<String>,
    fail_open: bool,
    fail_write_after: Option<usize>,
    fail_read: bool,
    open: bool,
    baud_rate: Option<u32>,
    opens: usize,
    closes: usize,
}

impl MockTransport {
    /// Create a transport with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes the device sends as soon as the port opens
    pub fn on_open(mut self, data: impl AsRef<[u8]>) -> Self {
        self.on_open.extend_from_slice(data.as_ref());
        self
    }

    /// Queue the device's answer to the next line the host writes
    pub fn reply(mut self, data: impl AsRef<[u8]>) -> Self {
        self.replies.push_back(data.as_ref().to_vec());
        self
    }

    /// Make [`Transport::open`] fail
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make [`Transport::write`] fail once `lines` lines have been written
    pub fn failing_write_after(mut self, lines: usize) -> Self {
        self.fail_write_after = Some(lines);
        self
    }

    /// Make [`Transport::read_available`] fail
    pub fn failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Lines written by the host, without their terminators
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Baud rate of the last successful open
    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    /// Number of successful opens
    pub fn open_count(&self) -> usize {
        self.opens
    }

    /// Number of times an open port was closed
    pub fn close_count(&self) -> usize {
        self.closes
    }
}

impl Transport for MockTransport {
    fn open(&mut self, baud_rate: u32) -> Result<()> {
        if self.fail_open {
            return Err(SessionError::PortOpenFailed("mock port unavailable".into()));
        }
        self.open = true;
        self.opens += 1;
        self.baud_rate = Some(baud_rate);
        let greeting = std::mem::take(&mut self.on_open);
        self.rx.extend(greeting);
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.closes += 1;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn bytes_available(&mut self) -> Result<usize> {
        if !self.open {
            return Err(SessionError::not_open());
        }
        Ok(self.rx.len())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.open {
            return Err(SessionError::not_open());
        }
        if self.fail_read {
            return Err(SessionError::Io("mock read failed".into()));
        }
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.open {
            return Err(SessionError::not_open());
        }
        if self.fail_write_after == Some(self.written.len()) {
            return Err(SessionError::Io("mock write failed".into()));
        }
        self.pending_write.extend_from_slice(data);
        while let Some(end) = self.pending_write.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending_write.drain(..=end).collect();
            self.written
                .push(String::from_utf8_lossy(&line[..end]).into_owned());
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.open {
            return Err(SessionError::not_open());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_released_per_line() {
        let mut mock = MockTransport::new().reply("A\n").reply("B\n");
        mock.open(9600).unwrap();
        assert_eq!(mock.bytes_available().unwrap(), 0);

        mock.write(b"one").unwrap();
        assert_eq!(mock.bytes_available().unwrap(), 0);
        mock.write(b"\ntwo\n").unwrap();
        assert_eq!(mock.bytes_available().unwrap(), 4);
        assert_eq!(mock.written(), ["one", "two"]);
    }

    #[test]
    fn test_open_and_close_counts() {
        let mut mock = MockTransport::new();
        mock.close();
        assert_eq!(mock.close_count(), 0);
        mock.open(115200).unwrap();
        assert_eq!(mock.baud_rate(), Some(115200));
        mock.close();
        mock.close();
        assert_eq!(mock.open_count(), 1);
        assert_eq!(mock.close_count(), 1);
        assert_eq!(mock.write(b"x\n"), Err(SessionError::not_open()));
    }

    #[test]
    fn test_injected_io_failures() {
        let mut mock = MockTransport::new().on_open("READY\n").failing_write_after(1);
        mock.open(9600).unwrap();
        mock.write(b"first\n").unwrap();
        assert!(matches!(mock.write(b"second\n"), Err(SessionError::Io(_))));
        assert_eq!(mock.written(), ["first"]);

        let mut mock = MockTransport::new().on_open("READY\n").failing_read();
        mock.open(9600).unwrap();
        assert_eq!(mock.bytes_available().unwrap(), 6);
        let mut buf = [0u8; 8];
        assert!(matches!(mock.read_available(&mut buf), Err(SessionError::Io(_))));
    }

    #[test]
    fn test_failing_open() {
        let mut mock = MockTransport::new().failing_open();
        assert!(matches!(mock.open(9600), Err(SessionError::PortOpenFailed(_))));
        assert!(!mock.is_open());
    }
}
