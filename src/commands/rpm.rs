//! RPM test feed command

use std::thread;
use std::time::Duration;

use shiftlight_serial::{RpmFeed, SerialTransport, SessionConfig};

/// Send each value in turn, waiting `interval_ms` between them
pub fn run_rpm(
    port: &str,
    values: &[i64],
    interval_ms: u64,
    config: &SessionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut feed = RpmFeed::open(SerialTransport::new(port), config)?;

    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(interval_ms));
        }
        let sent = feed.send(value)?;
        println!("rpm={}", sent);
    }
    Ok(())
}
