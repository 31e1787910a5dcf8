//! Error types for LetraTag codec and printer session operations.
//!
//! Every codec failure is a local validation failure raised before any bytes
//! are produced, so a caller never observes a partially encoded buffer.

use thiserror::Error;

/// Main error type for LetraTag operations.
///
/// The device protocol has no vendor documentation, so each variant carries
/// the values that broke the invariant (expected vs actual) to make hardware
/// debugging possible from a log line alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Canvas dimensions the printer cannot address.
    ///
    /// Height must be exactly 32 rows and width must not exceed
    /// [`MAX_WIDTH`](crate::MAX_WIDTH) columns.
    #[error("Invalid canvas dimension {width}x{height}: height must be 32 and width at most 8192")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Pixel ({x}, {y}) is outside of the {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Byte buffer length does not match what its declared dimensions imply.
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Payload length does not fit the 4-byte length field of the header.
    #[error("Payload of {0} bytes does not fit a 32-bit length field")]
    PayloadTooLarge(usize),

    /// More chunks than a single index byte can number.
    #[error("Payload needs {0} chunks but a chunk index is a single byte")]
    TooManyChunks(usize),

    #[error("Malformed notification {0:02X?}: expected 3 bytes starting with 1B 52")]
    MalformedNotification(Vec<u8>),

    #[error("Unknown status code {0}")]
    UnknownStatusCode(u8),

    /// Failure reported by the BLE transport implementation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The printer never sent a status other than "in progress".
    #[error("No final status received after {0} notifications")]
    NoFinalStatus(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_violation() {
        let err = Error::SizeMismatch {
            expected: 8,
            actual: 7,
        };
        assert_eq!(err.to_string(), "Size mismatch: expected 8 bytes, got 7");

        let err = Error::InvalidDimension {
            width: 4,
            height: 16,
        };
        assert_eq!(
            err.to_string(),
            "Invalid canvas dimension 4x16: height must be 32 and width at most 8192"
        );

        let err = Error::MalformedNotification(vec![0x00, 0x52, 0x03]);
        assert_eq!(
            err.to_string(),
            "Malformed notification [00, 52, 03]: expected 3 bytes starting with 1B 52"
        );
    }
}
