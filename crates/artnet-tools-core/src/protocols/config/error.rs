use thiserror::Error;

/// Errors returned while building or decoding configuration payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AP password must be at least {min} characters long (got {actual})")]
    PasswordTooShort { min: usize, actual: usize },
    #[error("station list is empty")]
    EmptyStationList,
    #[error("stations must be given as ssid/password pairs (got {count} values)")]
    UnpairedStation { count: usize },
    #[error("SSID must not be empty")]
    EmptySsid,
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("missing NUL terminator after {field}")]
    MissingTerminator { field: &'static str },
    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}
