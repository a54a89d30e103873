//! Error types for shiftlight-serial

use thiserror::Error;

/// Text reported when the device sent nothing at all
pub const NO_RESPONSE: &str = "(no response)";

/// Errors that end a programming session or a transport operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Transport could not be opened
    #[error("failed to open port: {0}")]
    PortOpenFailed(String),

    /// Device did not announce itself with READY
    #[error("device not ready: {received}")]
    DeviceNotReady {
        /// What the device sent instead
        received: String,
    },

    /// Device did not acknowledge HELLO
    #[error("handshake rejected: {received}")]
    HandshakeRejected {
        /// What the device sent instead
        received: String,
    },

    /// Device did not acknowledge a frame line
    #[error("frame {index} rejected: sent '{sent}', received {received}")]
    FrameRejected {
        /// Position of the frame in the animation
        index: usize,
        /// Line that was sent
        sent: String,
        /// What the device sent instead of OK
        received: String,
    },

    /// Transport failure that is not an OS error, e.g. use of a closed port
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O error during communication
    #[error("I/O error: {0}")]
    Io(String),

    /// Serial port driver error
    #[error("serial port error: {0}")]
    Serial(String),
}

impl SessionError {
    /// Error for an operation on a transport that is not open
    pub fn not_open() -> Self {
        SessionError::Transport("port is not open".into())
    }
}

/// Result type for session operations
pub type Result<T> = core::result::Result<T, SessionError>;

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e.to_string())
    }
}

#[cfg(feature = "serial")]
impl From<serialport::Error> for SessionError {
    fn from(e: serialport::Error) -> Self {
        SessionError::Serial(e.to_string())
    }
}

/// Errors loading a session configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML or has unknown keys
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
