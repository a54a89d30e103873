//! RPM test feed
//!
//! A programmed device lights its LEDs from the RPM it is fed. For bench
//! testing, [`RpmFeed`] sends synthetic values as `rpm=<value>` lines.

use std::thread;

use shiftlight_core::frame::MAX_RPM;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::transport::Transport;

/// Clamp an RPM value to what the device accepts
pub fn clamp_rpm(value: i64) -> u16 {
    value.clamp(0, i64::from(MAX_RPM)) as u16
}

/// Open link that feeds RPM values to the device
///
/// The transport is closed when the feed is dropped.
pub struct RpmFeed<T: Transport> {
    transport: T,
}

impl<T: Transport> RpmFeed<T> {
    /// Open `transport` at the configured baud rate and wait for the device to settle
    pub fn open(mut transport: T, config: &SessionConfig) -> Result<Self> {
        transport.open(config.baud_rate).map_err(|e| match e {
            SessionError::PortOpenFailed(_) => e,
            other => SessionError::PortOpenFailed(other.to_string()),
        })?;
        let feed = Self { transport };
        let settle = config.settle_delay();
        if !settle.is_zero() {
            thread::sleep(settle);
        }
        Ok(feed)
    }

    /// Send one RPM value, clamped to `0..=9999`
    ///
    /// Returns the value actually sent.
    pub fn send(&mut self, rpm: i64) -> Result<u16> {
        let value = clamp_rpm(rpm);
        if i64::from(value) != rpm {
            log::debug!("rpm: clamped {} to {}", rpm, value);
        }
        let line = format!("rpm={}\n", value);
        log::trace!("rpm: -> {}", line.trim_end());
        self.transport.write(line.as_bytes())?;
        self.transport.flush()?;
        Ok(value)
    }
}

impl<T: Transport> Drop for RpmFeed<T> {
    fn drop(&mut self) {
        self.transport.close();
    }
}
