use thiserror::Error;

/// Generic streamer error
#[derive(Debug, Error)]
pub enum StreamError {
    /// Invalid destination, port or frame rate
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unreadable or malformed trace or wire data
    #[error("parse error: {0}")]
    Parse(String),

    /// Socket creation failure
    #[error("socket error: {0}")]
    Socket(#[source] std::io::Error),

    /// End of the payload source before the declared unit length was read
    #[error("payload truncated at offset {offset:#x}: expected {expected} bytes, got {read}")]
    PayloadTruncated {
        /// Byte offset of the unit inside the payload source
        offset: u32,
        /// Declared unit length
        expected: usize,
        /// Bytes actually read before EOF
        read: usize,
    },

    /// I/O failure while reading the payload source
    #[error("payload read error: {0}")]
    PayloadRead(#[source] std::io::Error),

    /// A control unit has no following unit to pair with
    #[error("control unit at end of trace, no unit to pair with")]
    PairingIncomplete,

    /// Non-retryable socket send failure
    #[error("transmit error: {0}")]
    Transmit(#[source] std::io::Error),

    /// The run was stopped by an external shutdown request
    #[error("interrupted")]
    Interrupted,
}

/// Result of a streamer operation
pub type Result<T> = std::result::Result<T, StreamError>;
