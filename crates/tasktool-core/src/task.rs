//! Task types as returned by the remote task service.

use crate::{TaskId, TaskStatus};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identity and classification of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskInfo {
    /// Unique task identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub task_id: TaskId,

    /// Category the task belongs to; reports are grouped by this.
    #[serde(deserialize_with = "null_as_default")]
    pub object_type: String,

    /// Address of the source the task consumes (e.g. an RTSP stream).
    #[serde(deserialize_with = "null_as_default")]
    pub source_address: String,
}

/// A task together with its current status.
///
/// Two wire shapes are accepted: the nested `{"info": {...}, "status": {...}}`
/// form and a flat form where the info fields sit next to `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Identity of the task.
    pub info: TaskInfo,

    /// Last known status.
    pub status: TaskStatus,
}

impl Task {
    /// Create a new Task.
    pub fn new(
        task_id: impl Into<TaskId>,
        object_type: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            info: TaskInfo {
                task_id: task_id.into(),
                object_type: object_type.into(),
                source_address: String::new(),
            },
            status: TaskStatus::new(status),
        }
    }

    /// Builder method to set the source address.
    pub fn with_source(mut self, source_address: impl Into<String>) -> Self {
        self.info.source_address = source_address.into();
        self
    }

    /// Task identifier.
    pub fn id(&self) -> &TaskId {
        &self.info.task_id
    }

    /// Object type of the task.
    pub fn object_type(&self) -> &str {
        &self.info.object_type
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let status = match take_field(&mut fields, "status", "Status") {
            Some(value) => TaskStatus::deserialize(value).map_err(D::Error::custom)?,
            None => TaskStatus::default(),
        };
        // The nested form is chosen whenever an `info` key is present, so a
        // malformed `info` object is an error rather than an empty task.
        let info = match take_field(&mut fields, "info", "Info") {
            Some(value) => TaskInfo::deserialize(value),
            None => TaskInfo::deserialize(Value::Object(fields)),
        }
        .map_err(D::Error::custom)?;

        Ok(Self { info, status })
    }
}

/// Remove a key, accepting its capitalised spelling. `null` counts as absent.
fn take_field(fields: &mut Map<String, Value>, key: &str, alias: &str) -> Option<Value> {
    fields
        .remove(key)
        .or_else(|| fields.remove(alias))
        .filter(|value| !value.is_null())
}

/// Response envelope of the list operation.
///
/// Order follows the server response and is not stable across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfoResp {
    #[serde(default, alias = "Tasks", deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

/// Decode `null` as the type's default, the way the service's own clients do.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
