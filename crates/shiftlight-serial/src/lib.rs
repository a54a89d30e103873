//! shiftlight-serial - Serial programming protocol for LED shift lights
//!
//! This crate sends a [`shiftlight_core`] animation to the device over a
//! line based serial protocol.
//!
//! # Protocol Overview
//!
//! After the port is opened the device resets, prints any number of `#`
//! comment lines and then `READY`. The host answers `HELLO` and waits for
//! `OK`, then sends one encoded frame line at a time, each acknowledged with
//! `OK`. The device also accepts `rpm=<value>` lines for bench testing.
//!
//! # Example
//!
//! ```no_run
//! use shiftlight_core::Program;
//! use shiftlight_serial::{
//!     NoProgress, ProgramContext, ProgrammingSession, SerialTransport, SessionConfig,
//! };
//!
//! let program = Program::from_file("launch.slp")?;
//! let transport = SerialTransport::new("/dev/ttyACM0");
//! let mut session = ProgrammingSession::new(transport, SessionConfig::default());
//! let report = session.run(ProgramContext::from(&program), &mut NoProgress)?;
//! println!("{} frames programmed", report.sent);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod lines;
pub mod mock;
pub mod rpm;
pub mod session;
pub mod transport;

// Re-exports
pub use config::SessionConfig;
pub use error::{ConfigError, Result, SessionError, NO_RESPONSE};
pub use mock::MockTransport;
pub use rpm::RpmFeed;
pub use session::{
    NoProgress, Outcome, ProgramContext, ProgrammingSession, SessionProgress, SessionReport,
    SessionState, SkippedFrame,
};
pub use transport::Transport;

#[cfg(feature = "serial")]
pub use transport::serial::{list_ports, PortInfo, SerialTransport};
