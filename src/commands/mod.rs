//! CLI command implementations
//!
//! - `program` - offline commands on program files (`check`, `eval`)
//! - `upload` - programming the device, with progress bars
//! - `rpm` - feeding test RPM values to the device
//! - `list` - serial port enumeration

mod list;
pub mod program;
pub mod rpm;
pub mod upload;

pub use list::list_serial_ports;
