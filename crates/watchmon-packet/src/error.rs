//! Error types for watchmon-packet.

use thiserror::Error;

/// Errors that can occur while decoding a frame.
///
/// All of these are non-fatal to a receiver: a frame that fails to decode is
/// dropped and the next datagram is processed independently.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Frame shorter than the 8-byte header, or marker bytes missing.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Frame shorter than the fixed minimum for its message type. Expected
    /// transiently from mixed-firmware systems sending legacy-length frames.
    #[error("Frame for message type 0x{msg_type:04X} too short: {len} bytes (minimum {min})")]
    TooShort {
        /// Message type from the header.
        msg_type: u16,
        /// Actual frame length.
        len: usize,
        /// Minimum length for this message type.
        min: usize,
    },

    /// Array payload shorter than its declared entry count requires.
    #[error("Truncated array payload: need {needed} bytes for {count} entries, have {len}")]
    TruncatedArray {
        /// Declared number of entries.
        count: usize,
        /// Payload bytes required for that count.
        needed: usize,
        /// Actual payload length.
        len: usize,
    },
}

impl FrameError {
    /// Create an invalid-header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        FrameError::InvalidHeader(message.into())
    }
}
