//! Client library for the remote task service.
//!
//! Provides an HTTP transport with a pluggable authentication hook, the
//! bearer-token sign-in provider, and a typed client for the task endpoints.

pub mod auth;
pub mod error;
pub mod http;
pub mod tasks;

pub use auth::{sign_token, AuthProvider, Credentials, NoAuth, SignTokenAuth};
pub use error::ClientError;
pub use http::{HttpResponse, HttpTransport, Payload, TransportConfig, DEFAULT_TIMEOUT};
pub use tasks::{AddTasksRequest, TaskServiceClient};
