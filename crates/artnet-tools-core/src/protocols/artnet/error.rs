use thiserror::Error;

/// Errors returned by Art-Net frame encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtNetError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid Art-Net signature")]
    InvalidSignature,
    #[error("DMX payload too long: {length} bytes (max {max})")]
    PayloadTooLong { length: usize, max: usize },
    #[error("unsupported protocol version: {version}")]
    UnsupportedProtocolVersion { version: u16 },
    #[error("invalid ArtDMX length: declared {length}, available {available}")]
    InvalidLength { length: u16, available: usize },
}
