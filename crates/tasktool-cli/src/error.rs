//! Errors surfaced by the command layer.

use std::io;

use tasktool_client::ClientError;
use tasktool_core::CoreError;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or conflicting arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// Talking to the task service failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The report could not be built.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}
