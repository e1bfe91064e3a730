//! Server-side status of a task.

use serde::{Deserialize, Serialize};

use crate::task::null_as_default;

/// Status of a task as of the service's last poll.
///
/// The service reports status as free-form strings, so no attempt is made to
/// map them onto an enum here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStatus {
    /// Status name (e.g. `RUNNING`).
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,

    /// Error message reported for the task, empty when healthy.
    #[serde(deserialize_with = "null_as_default")]
    pub error_message: String,

    /// When the service last heard from the task.
    #[serde(deserialize_with = "null_as_default")]
    pub last_received_time: String,
}

impl TaskStatus {
    /// Create a status with only the status name set.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// Returns true if the service reported an error for the task.
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}
