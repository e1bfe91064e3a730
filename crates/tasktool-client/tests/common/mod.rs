//! Shared test helpers for tasktool-client integration tests.
//!
//! Runs an in-process axum server that stands in for the task service and
//! its sign-in endpoint, recording every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use tasktool_client::{
    AuthProvider, HttpTransport, NoAuth, TaskServiceClient, TransportConfig,
};

/// A request as seen by the mock service.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

type Responder = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    respond: Arc<Responder>,
    delay: Duration,
}

/// Mock task service bound to a random local port.
pub struct MockService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockService {
    /// Start a service that answers every request with `respond`.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        Self::start_delayed(Duration::ZERO, respond).await
    }

    /// Start a service that waits `delay` before answering each request.
    pub async fn start_delayed<F>(delay: Duration, respond: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            respond: Arc::new(respond),
            delay,
        };
        let router = Router::new().fallback(handle).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    };
    let (status, body) = (state.respond)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Client without authentication.
pub fn client(base_url: &str) -> TaskServiceClient {
    let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
    TaskServiceClient::new(base_url, transport).unwrap()
}

/// Unauthenticated client with a custom transport configuration.
pub fn client_with_config(base_url: &str, config: &TransportConfig) -> TaskServiceClient {
    let transport = HttpTransport::new(config).unwrap();
    TaskServiceClient::new(base_url, transport).unwrap()
}

/// Client using the given auth provider over `http`.
pub fn client_with_auth(
    base_url: &str,
    http: reqwest::Client,
    auth: Arc<dyn AuthProvider>,
) -> TaskServiceClient {
    TaskServiceClient::new(base_url, HttpTransport::with_client(http, auth)).unwrap()
}

/// Base URL of a local port nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Unauthenticated provider, for symmetry with [`client_with_auth`].
pub fn no_auth() -> Arc<dyn AuthProvider> {
    Arc::new(NoAuth)
}

/// A listing body in the nested wire form.
pub fn listing_json() -> String {
    serde_json::json!({
        "tasks": [
            {
                "info": {"task_id": "t-1", "object_type": "OBJECT_ALGO", "source_address": "rtsp://cam/1"},
                "status": {"status": "RUNNING", "error_message": "", "last_received_time": "2024-05-01T10:00:00Z"}
            },
            {
                "info": {"task_id": "t-2", "object_type": "FACE", "source_address": "rtsp://cam/2"},
                "status": {"status": "FAILED", "error_message": "stream lost", "last_received_time": ""}
            },
            {
                "info": {"task_id": "t-3", "object_type": "OBJECT_ALGO", "source_address": "rtsp://cam/3"},
                "status": {"status": "PENDING"}
            }
        ]
    })
    .to_string()
}
