//! tasktool Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - HTTP or any other transport
//! - Authentication
//! - Console output
//!
//! It holds the task model returned by the remote task service and the
//! report aggregator that groups tasks by object type for display.

pub mod error;
pub mod ids;
pub mod report;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::TaskId;
pub use report::{Report, ReportGroup, ReportRow};
pub use status::TaskStatus;
pub use task::{Task, TaskInfo, TaskInfoResp};
