//! Error types for the task service client.

use thiserror::Error;

/// Errors that can occur when talking to the task service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, TLS or timeout failure, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an unexpected status code.
    #[error("{operation} failed: HTTP {status}")]
    Remote { operation: &'static str, status: u16 },

    /// The response body was not the expected JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// Sign-in succeeded but produced no usable token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The endpoint or a derived URL is not valid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request was rejected before being sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Status code of a remote error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
