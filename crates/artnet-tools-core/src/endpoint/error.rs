use thiserror::Error;

/// Errors returned while resolving a send/receive endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("no interface or address matches pattern '{pattern}'")]
    NotFound { pattern: String },
    #[error("invalid interface pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("failed to enumerate network interfaces: {0}")]
    Enumeration(#[from] std::io::Error),
    #[error("network interface enumeration is not supported on this platform")]
    Unsupported,
}
