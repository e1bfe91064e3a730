//! HTTP transport for the task service.
//!
//! Every request goes through [`HttpTransport::execute`], which consults the
//! configured [`AuthProvider`] before anything is sent and reads the response
//! body to completion before returning.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::{AuthProvider, NoAuth};
use crate::error::ClientError;

/// Default request timeout. Task operations on the service can be slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Settings for building the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,

    /// Accept any server certificate. Only meant for self-signed internal
    /// deployments.
    pub insecure_ignore_tls: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            insecure_ignore_tls: false,
        }
    }
}

impl TransportConfig {
    /// Build a reqwest client with these settings.
    ///
    /// The same client is shared with the sign-in provider so both calls use
    /// one timeout and TLS policy.
    pub fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        if self.insecure_ignore_tls {
            warn!("TLS certificate verification is disabled");
        }
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.insecure_ignore_tls)
            .build()?;
        Ok(client)
    }
}

/// Request body with its content type.
#[derive(Debug, Clone)]
pub struct Payload {
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl Payload {
    /// Serialize a value as a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        Ok(Self {
            content_type: "application/json",
            bytes,
        })
    }

    /// Content type sent with the body.
    pub fn content_type(&self) -> &str {
        self.content_type
    }
}

/// Status and fully-read body of a response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// HTTP transport with an authentication hook.
#[derive(Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    auth: Arc<dyn AuthProvider>,
}

impl HttpTransport {
    /// Create an unauthenticated transport from a config.
    pub fn new(config: &TransportConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(config.build_client()?, Arc::new(NoAuth)))
    }

    /// Create a transport over an existing client and auth provider.
    pub fn with_client(inner: reqwest::Client, auth: Arc<dyn AuthProvider>) -> Self {
        Self { inner, auth }
    }

    /// Send a request and read the whole response.
    ///
    /// Fails without sending anything if the auth provider fails.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        payload: Option<Payload>,
    ) -> Result<HttpResponse, ClientError> {
        let authorization = self.auth.authorization(&method, &url).await?;

        debug!(method = %method, url = %url, "HTTP request");
        let mut request = self.inner.request(method, url);
        if let Some(value) = authorization.filter(|v| !v.is_empty()) {
            request = request.header(AUTHORIZATION, value);
        }
        if let Some(payload) = payload {
            request = request
                .header(CONTENT_TYPE, payload.content_type)
                .body(payload.bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "HTTP response");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(600));
        assert!(!config.insecure_ignore_tls);
    }

    #[test]
    fn test_json_payload() {
        let payload = Payload::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(payload.content_type(), "application/json");
        assert_eq!(payload.bytes, br#"{"a":1}"#);
    }

    #[test]
    fn test_response_decode_error() {
        let response = HttpResponse {
            status: StatusCode::OK,
            body: "not json".to_string(),
        };
        let result: Result<serde_json::Value, _> = response.json();
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
