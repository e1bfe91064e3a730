//! Core domain errors.

use thiserror::Error;

/// Core domain errors for tasktool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A report filter named an object type that no task carries.
    #[error("Unknown object type: {0}")]
    UnknownObjectType(String),
}
