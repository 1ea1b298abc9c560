//! Error types for fetching and persistence.

use thiserror::Error;

/// A malformed status response body.
#[derive(Debug, Error)]
#[error("malformed status payload: {0}")]
pub struct ParseError(pub String);

/// Errors that can occur when fetching status from the device.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out - device may be offline")]
    Timeout,

    /// The device refused the connection.
    #[error("connection refused - check device address and port")]
    ConnectionRefused,

    /// The response body could not be parsed as a status report.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Any other transport or protocol failure.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionRefused
        } else if err.is_decode() {
            FetchError::Parse(ParseError(err.to_string()))
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

/// Errors that can occur when flushing the reading log to disk.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The buffer could not be serialized to JSON.
    #[error("failed to serialize reading log: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The log file could not be written.
    #[error("failed to write reading log: {0}")]
    Io(#[from] std::io::Error),
}
