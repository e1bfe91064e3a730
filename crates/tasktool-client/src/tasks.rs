//! Client for the task service endpoints.

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info};

use tasktool_core::{TaskId, TaskInfoResp};

use crate::error::ClientError;
use crate::http::{HttpResponse, HttpTransport, Payload};

/// Size of the single page requested by [`TaskServiceClient::list_all_tasks`].
pub const LIST_PAGE_LIMIT: u32 = 1000;

const TASKS_PATH: &str = "/v1/tasks";

/// Body of a task creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddTasksRequest {
    /// Number of tasks to create.
    pub num: u32,

    /// Object type of the new tasks.
    pub object_type: String,

    /// Source the tasks consume (e.g. an RTSP URL).
    pub source_address: String,

    /// Optional object storage key for task output.
    #[serde(rename = "minio_key", skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}

impl AddTasksRequest {
    /// Create a request; an empty storage key is treated as absent.
    pub fn new(
        num: u32,
        object_type: impl Into<String>,
        source_address: impl Into<String>,
        storage_key: Option<String>,
    ) -> Self {
        Self {
            num,
            object_type: object_type.into(),
            source_address: source_address.into(),
            storage_key: storage_key.filter(|k| !k.is_empty()),
        }
    }

    /// Check the required fields.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.num == 0 {
            return Err(ClientError::InvalidInput("task count must be > 0".into()));
        }
        if self.object_type.is_empty() {
            return Err(ClientError::InvalidInput("object type is required".into()));
        }
        if self.source_address.is_empty() {
            return Err(ClientError::InvalidInput("source address is required".into()));
        }
        Ok(())
    }
}

/// Typed client for the task service.
///
/// Every call is a single request: no retries, no caching, and listing reads
/// only the first page.
#[derive(Clone)]
pub struct TaskServiceClient {
    transport: HttpTransport,
    base_url: String,
}

impl TaskServiceClient {
    /// Create a client for the service at `endpoint`.
    pub fn new(endpoint: &str, transport: HttpTransport) -> Result<Self, ClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("no endpoint configured".into()));
        }
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List tasks (first page of up to [`LIST_PAGE_LIMIT`]).
    pub async fn list_all_tasks(&self) -> Result<TaskInfoResp, ClientError> {
        let mut url = self.tasks_url()?;
        url.query_pairs_mut()
            .append_pair("page_request.offset", "0")
            .append_pair("page_request.limit", &LIST_PAGE_LIMIT.to_string());

        let response = self.transport.execute(Method::GET, url, None).await?;
        expect_ok(&response, "list tasks")?;
        debug!(body = %response.body, "Task listing");

        let resp: TaskInfoResp = response.json()?;
        if resp.tasks.len() as u32 >= LIST_PAGE_LIMIT {
            info!(limit = LIST_PAGE_LIMIT, "Listing hit the page limit; later tasks are not shown");
        }
        Ok(resp)
    }

    /// Fetch a task's detail as the raw response body.
    pub async fn get_task(&self, task_id: &TaskId) -> Result<String, ClientError> {
        let url = self.task_url(task_id)?;
        let response = self.transport.execute(Method::GET, url, None).await?;
        expect_ok(&response, "get task")?;
        Ok(response.body)
    }

    /// Create `request.num` tasks.
    pub async fn add_tasks(&self, request: &AddTasksRequest) -> Result<(), ClientError> {
        request.validate()?;
        let url = self.tasks_url()?;
        let payload = Payload::json(request)?;

        info!(
            num = request.num,
            object_type = %request.object_type,
            source = %request.source_address,
            "Adding tasks"
        );
        let response = self.transport.execute(Method::POST, url, Some(payload)).await?;
        expect_success(&response, "add tasks")
    }

    /// Delete a single task.
    pub async fn delete_task_by_id(&self, task_id: &TaskId) -> Result<(), ClientError> {
        let url = self.task_url(task_id)?;
        self.delete(url, "delete task").await
    }

    /// Delete every task of an object type.
    pub async fn delete_tasks_by_object_type(&self, object_type: &str) -> Result<(), ClientError> {
        if object_type.is_empty() {
            return Err(ClientError::InvalidInput("object type is required".into()));
        }
        let mut url = self.tasks_url()?;
        url.query_pairs_mut().append_pair("object_type", object_type);
        self.delete(url, "delete tasks by object type").await
    }

    /// Delete all tasks.
    pub async fn delete_all_tasks(&self) -> Result<(), ClientError> {
        let mut url = self.tasks_url()?;
        url.query_pairs_mut().append_pair("all", "true");
        self.delete(url, "delete all tasks").await
    }

    async fn delete(&self, url: Url, operation: &'static str) -> Result<(), ClientError> {
        let response = self.transport.execute(Method::DELETE, url, None).await?;
        expect_success(&response, operation)
    }

    fn tasks_url(&self) -> Result<Url, ClientError> {
        let url = format!("{}{}", self.base_url, TASKS_PATH);
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))
    }

    fn task_url(&self, task_id: &TaskId) -> Result<Url, ClientError> {
        if task_id.is_empty() {
            return Err(ClientError::InvalidInput("task id is required".into()));
        }
        let mut url = self.tasks_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(task_id.as_str());
        Ok(url)
    }
}

fn expect_ok(response: &HttpResponse, operation: &'static str) -> Result<(), ClientError> {
    if response.status == StatusCode::OK {
        Ok(())
    } else {
        Err(remote_error(response, operation))
    }
}

fn expect_success(response: &HttpResponse, operation: &'static str) -> Result<(), ClientError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(remote_error(response, operation))
    }
}

fn remote_error(response: &HttpResponse, operation: &'static str) -> ClientError {
    debug!(operation, body = %response.body, "Unexpected status");
    ClientError::Remote {
        operation,
        status: response.status.as_u16(),
    }
}
