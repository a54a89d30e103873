//! Session configuration
//!
//! Timing and policy knobs for talking to the device. Every field has a
//! default, so a configuration file only needs the keys it changes:
//!
//! ```toml
//! [session]
//! baud_rate = 9600
//! ack_timeout_ms = 5000
//! skip_ack_comments = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Timing and policy for a programming session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Serial baud rate
    pub baud_rate: u32,
    /// Pause after opening the port before reading
    pub settle_delay_ms: u64,
    /// How long to wait for READY
    pub ready_timeout_ms: u64,
    /// How long to wait for the HELLO acknowledgement
    pub handshake_timeout_ms: u64,
    /// How long to wait for each frame acknowledgement
    pub ack_timeout_ms: u64,
    /// Sleep between polls when no input is pending
    pub poll_interval_ms: u64,
    /// Skip comment lines while waiting for frame acknowledgements
    pub skip_ack_comments: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay_ms: 100,
            ready_timeout_ms: 2000,
            handshake_timeout_ms: 2000,
            ack_timeout_ms: 2000,
            poll_interval_ms: 10,
            skip_ack_comments: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    session: SessionConfig,
}

impl SessionConfig {
    /// Parse the `[session]` table of a TOML document
    ///
    /// A document without the table yields the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.session)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// READY timeout as a [`Duration`]
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    /// Handshake timeout as a [`Duration`]
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    /// Frame acknowledgement timeout as a [`Duration`]
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
