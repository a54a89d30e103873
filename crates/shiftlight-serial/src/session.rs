//! Programming session
//!
//! A [`ProgrammingSession`] owns a [`Transport`] and drives the line based
//! programming protocol over it:
//!
//! ```text
//! device: # comment lines ... READY
//! host:   HELLO
//! device: # comment lines ... OK
//! host:   <frame line>          \
//! device: OK                    / once per frame
//! ```
//!
//! Every host line is written with a trailing `\n` and flushed before the
//! response is awaited. Input left over from the previous exchange is
//! discarded before each host line. Any rejected response or timeout
//! aborts the whole session. Once the port has been opened it is closed
//! again on every exit path.

use std::thread;
use std::time::{Duration, Instant};

use shiftlight_core::{Animation, DecodeError, Program, VariableTable};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError, NO_RESPONSE};
use crate::lines::{is_comment, LineReader};
use crate::transport::Transport;

/// Line the device sends once it has booted
pub const READY: &str = "READY";
/// Handshake line sent by the host
pub const HELLO: &str = "HELLO";
/// Acknowledgement sent by the device
pub const OK: &str = "OK";

/// Largest chunk read from the transport in one poll
const READ_CHUNK_SIZE: usize = 256;

/// What a session sends: the animation and the variables to resolve it with
#[derive(Debug, Clone, Copy)]
pub struct ProgramContext<'a> {
    /// Frames to stream, in order
    pub animation: &'a Animation,
    /// Variables each frame line is resolved against before sending
    pub variables: &'a VariableTable,
}

impl<'a> ProgramContext<'a> {
    /// Create a context from its parts
    pub fn new(animation: &'a Animation, variables: &'a VariableTable) -> Self {
        Self {
            animation,
            variables,
        }
    }
}

impl<'a> From<&'a Program> for ProgramContext<'a> {
    fn from(program: &'a Program) -> Self {
        Self::new(&program.animation, &program.variables)
    }
}

/// How a finished session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every frame was acknowledged
    Success,
    /// The session was aborted
    Failure(SessionError),
}

/// Protocol state of a [`ProgrammingSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Port closed; carries the outcome once a run has finished
    Closed(Option<Outcome>),
    /// Opening the transport
    Opening,
    /// Waiting for READY
    AwaitingReady,
    /// Sending HELLO
    SendHandshake,
    /// Waiting for the HELLO acknowledgement
    AwaitingHandshakeAck,
    /// Sending the frame at this animation index
    StreamingFrame(usize),
    /// Waiting for the acknowledgement of the frame at this index
    AwaitingFrameAck(usize),
}

/// A frame that was left out of the stream because it no longer resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    /// Animation index of the frame
    pub index: usize,
    /// Authored line
    pub line: String,
    /// Why it could not be resolved
    pub error: DecodeError,
}

/// Summary of a successful session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Number of frames sent and acknowledged
    pub sent: usize,
    /// Frames left out of the stream
    pub skipped: Vec<SkippedFrame>,
    /// Wall time from opening the port to the last acknowledgement
    pub elapsed: Duration,
}

/// Progress callbacks for a programming session
pub trait SessionProgress {
    /// Called before the port is opened
    fn connecting(&mut self, baud_rate: u32);

    /// Called once the device has acknowledged HELLO
    fn handshake_complete(&mut self);

    /// Called before streaming starts with the number of frames in the animation
    fn streaming(&mut self, total_frames: usize);

    /// Called after the frame at `index` was acknowledged
    fn frame_sent(&mut self, index: usize, line: &str);

    /// Called when the frame at `index` is left out of the stream
    fn frame_skipped(&mut self, index: usize, error: &DecodeError);

    /// Called when the session has completed successfully
    fn complete(&mut self, report: &SessionReport);
}

/// A no-op progress reporter
pub struct NoProgress;

impl SessionProgress for NoProgress {
    fn connecting(&mut self, _baud_rate: u32) {}
    fn handshake_complete(&mut self) {}
    fn streaming(&mut self, _total_frames: usize) {}
    fn frame_sent(&mut self, _index: usize, _line: &str) {}
    fn frame_skipped(&mut self, _index: usize, _error: &DecodeError) {}
    fn complete(&mut self, _report: &SessionReport) {}
}

/// Drives the programming protocol over an exclusively owned transport
pub struct ProgrammingSession<T: Transport> {
    transport: T,
    config: SessionConfig,
    state: SessionState,
}

impl<T: Transport> ProgrammingSession<T> {
    /// Create a session over `transport`; the transport is not opened yet
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::Closed(None),
        }
    }

    /// Current protocol state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Program the device with `ctx`
    ///
    /// Frames are re-resolved against `ctx.variables` right before sending;
    /// frames that no longer resolve are skipped and listed in the report.
    /// Any protocol failure ends the run with an error. Either way the state
    /// ends as [`SessionState::Closed`] with the outcome.
    pub fn run(
        &mut self,
        ctx: ProgramContext<'_>,
        progress: &mut dyn SessionProgress,
    ) -> Result<SessionReport> {
        let result = self.drive(ctx, progress);

        let outcome = match &result {
            Ok(_) => Outcome::Success,
            Err(e) => Outcome::Failure(e.clone()),
        };
        set_state(&mut self.state, SessionState::Closed(Some(outcome)));

        match &result {
            Ok(report) => {
                log::info!(
                    "session: programmed {} frame(s) in {:.2?}",
                    report.sent,
                    report.elapsed
                );
                progress.complete(report);
            }
            Err(e) => log::debug!("session: aborted: {}", e),
        }
        result
    }

    fn drive(
        &mut self,
        ctx: ProgramContext<'_>,
        progress: &mut dyn SessionProgress,
    ) -> Result<SessionReport> {
        let config = self.config.clone();
        let started = Instant::now();

        set_state(&mut self.state, SessionState::Opening);
        progress.connecting(config.baud_rate);
        self.transport
            .open(config.baud_rate)
            .map_err(|e| match e {
                SessionError::PortOpenFailed(_) => e,
                other => SessionError::PortOpenFailed(other.to_string()),
            })?;

        let mut link = Link {
            transport: &mut self.transport,
            state: &mut self.state,
            lines: LineReader::new(),
            poll_interval: config.poll_interval(),
        };

        // Opening the port resets the device
        let settle = config.settle_delay();
        if !settle.is_zero() {
            thread::sleep(settle);
        }

        link.transition(SessionState::AwaitingReady);
        link.expect_line(READY, config.ready_timeout(), true, |received| {
            SessionError::DeviceNotReady { received }
        })?;

        link.transition(SessionState::SendHandshake);
        link.send_line(HELLO)?;

        link.transition(SessionState::AwaitingHandshakeAck);
        link.expect_line(OK, config.handshake_timeout(), true, |received| {
            SessionError::HandshakeRejected { received }
        })?;
        progress.handshake_complete();

        let entries = ctx.animation.entries();
        progress.streaming(entries.len());

        let mut report = SessionReport::default();
        for (index, entry) in entries.iter().enumerate() {
            let frame = match entry.resolve(Some(ctx.variables)) {
                Ok(frame) => frame,
                Err(error) => {
                    log::warn!(
                        "session: skipping frame {} '{}': {}",
                        index,
                        entry.source(),
                        error
                    );
                    progress.frame_skipped(index, &error);
                    report.skipped.push(SkippedFrame {
                        index,
                        line: entry.source().to_string(),
                        error,
                    });
                    continue;
                }
            };

            let line = frame.encode();
            link.transition(SessionState::StreamingFrame(index));
            link.send_line(&line)?;

            link.transition(SessionState::AwaitingFrameAck(index));
            link.expect_line(
                OK,
                config.ack_timeout(),
                config.skip_ack_comments,
                |received| SessionError::FrameRejected {
                    index,
                    sent: line.clone(),
                    received,
                },
            )?;

            report.sent += 1;
            progress.frame_sent(index, &line);
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }
}

fn set_state(state: &mut SessionState, next: SessionState) {
    log::debug!("session: {:?} -> {:?}", state, next);
    *state = next;
}

/// An open transport; closed when dropped
struct Link<'a, T: Transport> {
    transport: &'a mut T,
    state: &'a mut SessionState,
    lines: LineReader,
    poll_interval: Duration,
}

impl<T: Transport> Link<'_, T> {
    fn transition(&mut self, next: SessionState) {
        set_state(self.state, next);
    }

    /// Write `line` and flush
    ///
    /// Input still pending from earlier phases is dropped first, so only
    /// bytes received after this line can answer it.
    fn send_line(&mut self, line: &str) -> Result<()> {
        self.discard_input()?;
        log::trace!("session: -> {}", line);
        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        self.transport.write(&data)?;
        self.transport.flush()
    }

    /// Wait for a line equal to `expected`
    ///
    /// With `skip_comments`, blank and `#` lines are ignored. Any other line,
    /// or the timeout, is turned into an error by `reject` with the received
    /// text.
    fn expect_line<F>(
        &mut self,
        expected: &str,
        timeout: Duration,
        skip_comments: bool,
        reject: F,
    ) -> Result<()>
    where
        F: FnOnce(String) -> SessionError,
    {
        let deadline = Instant::now() + timeout;
        loop {
            while let Some(line) = self.lines.next_line() {
                log::trace!("session: <- {}", line);
                if skip_comments && is_comment(&line) {
                    log::debug!("session: skipping comment '{}'", line);
                    continue;
                }
                if line == expected {
                    return Ok(());
                }
                return Err(reject(line));
            }

            if Instant::now() >= deadline {
                let partial = self.lines.partial();
                let received = if partial.is_empty() {
                    NO_RESPONSE.to_string()
                } else {
                    partial
                };
                log::debug!("session: timed out after {:?} waiting for {}", timeout, expected);
                return Err(reject(received));
            }

            self.poll()?;
        }
    }

    fn discard_input(&mut self) -> Result<()> {
        while self.transport.bytes_available()? > 0 {
            if self.read_pending()? == 0 {
                break;
            }
        }
        let stale = self.lines.take();
        if !stale.is_empty() {
            log::debug!("session: discarding stale input {:?}", stale);
        }
        Ok(())
    }

    fn poll(&mut self) -> Result<()> {
        let available = self.transport.bytes_available()?;
        if available == 0 {
            thread::sleep(self.poll_interval);
            return Ok(());
        }
        self.read_pending()?;
        Ok(())
    }

    fn read_pending(&mut self) -> Result<usize> {
        let mut buf = [0u8; READ_CHUNK_SIZE];
        let n = self.transport.read_available(&mut buf)?;
        self.lines.push(&buf[..n]);
        Ok(n)
    }
}

impl<T: Transport> Drop for Link<'_, T> {
    fn drop(&mut self) {
        log::debug!("session: closing transport");
        self.transport.close();
    }
}
