//! Transport layer abstraction for the device link
//!
//! A [`Transport`] is a byte pipe that can be opened at a baud rate, polled
//! for pending input, and closed. The programming session and the RPM feed
//! only talk to the device through this trait.

use crate::error::Result;

/// Byte-level link to the device
pub trait Transport {
    /// Open the link at `baud_rate`
    fn open(&mut self, baud_rate: u32) -> Result<()>;

    /// Close the link
    ///
    /// Closing a link that is not open does nothing.
    fn close(&mut self);

    /// Whether the link is currently open
    fn is_open(&self) -> bool;

    /// Number of bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read up to `buf.len()` pending bytes
    ///
    /// Returns the number of bytes read, which may be 0.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write all of `data`
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flush any buffered output
    fn flush(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self, baud_rate: u32) -> Result<()> {
        (**self).open(baud_rate)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read_available(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

#[cfg(feature = "serial")]
pub mod serial {
    //! Serial port transport implementation

    use super::*;
    use crate::error::SessionError;
    use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
    use std::io::{Read, Write};
    use std::time::Duration;

    /// Serial port transport
    ///
    /// Created closed; the port is opened by [`Transport::open`] and released
    /// by [`Transport::close`] or when the transport is dropped.
    pub struct SerialTransport {
        path: String,
        port: Option<Box<dyn SerialPort>>,
    }

    impl SerialTransport {
        /// Create a transport for the port at `path` without opening it
        pub fn new(path: impl Into<String>) -> Self {
            Self {
                path: path.into(),
                port: None,
            }
        }

        fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
            self.port.as_mut().ok_or_else(SessionError::not_open)
        }
    }

    impl Transport for SerialTransport {
        fn open(&mut self, baud_rate: u32) -> Result<()> {
            let port = serialport::new(&self.path, baud_rate)
                .data_bits(DataBits::Eight)
                .parity(Parity::None)
                .stop_bits(StopBits::One)
                .flow_control(FlowControl::None)
                .timeout(Duration::from_millis(10))
                .open()
                .map_err(|e| SessionError::PortOpenFailed(format!("{}: {}", self.path, e)))?;

            log::info!("Opened serial port {} at {} baud", self.path, baud_rate);
            self.port = Some(port);
            Ok(())
        }

        fn close(&mut self) {
            if self.port.take().is_some() {
                log::info!("Closed serial port {}", self.path);
            }
        }

        fn is_open(&self) -> bool {
            self.port.is_some()
        }

        fn bytes_available(&mut self) -> Result<usize> {
            Ok(self.port()?.bytes_to_read()? as usize)
        }

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
            match self.port()?.read(buf) {
                Ok(n) => Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
                Err(e) => Err(SessionError::from(e)),
            }
        }

        fn write(&mut self, data: &[u8]) -> Result<()> {
            self.port()?.write_all(data)?;
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.port()?.flush()?;
            Ok(())
        }
    }

    /// A serial port found on the system
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PortInfo {
        /// Device path, e.g. `/dev/ttyACM0` or `COM3`
        pub path: String,
        /// Human readable description of the adapter
        pub description: String,
    }

    /// Enumerate the serial ports present on the system
    pub fn list_ports() -> Result<Vec<PortInfo>> {
        let ports = serialport::available_ports()?;
        Ok(ports
            .into_iter()
            .map(|p| PortInfo {
                description: describe(&p.port_type),
                path: p.port_name,
            })
            .collect())
    }

    fn describe(port_type: &SerialPortType) -> String {
        match port_type {
            SerialPortType::UsbPort(usb) => {
                let mut text = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
                if let Some(product) = &usb.product {
                    text.push_str(&format!(" {}", product));
                } else if let Some(manufacturer) = &usb.manufacturer {
                    text.push_str(&format!(" {}", manufacturer));
                }
                text
            }
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::Unknown => "unknown".to_string(),
        }
    }
}
