//! Authentication hooks for the HTTP transport.
//!
//! The transport asks its [`AuthProvider`] for an `Authorization` header value
//! before every request. [`SignTokenAuth`] exchanges an access/secret key pair
//! for a bearer token at the service's sign-in endpoint; [`NoAuth`] sends
//! requests unauthenticated.

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

/// Path of the sign-in endpoint, relative to the service origin.
pub const SIGN_TOKEN_PATH: &str = "/components/user_manager/v1/users/sign_token";

/// Produces the `Authorization` header for a request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Header value for a request, or `None` to send it unauthenticated.
    ///
    /// An error aborts the request before it is sent.
    async fn authorization(&self, method: &Method, url: &Url)
        -> Result<Option<String>, ClientError>;
}

/// Sends every request without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthProvider for NoAuth {
    async fn authorization(
        &self,
        _method: &Method,
        _url: &Url,
    ) -> Result<Option<String>, ClientError> {
        Ok(None)
    }
}

/// Access/secret key pair used to mint bearer tokens.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Build credentials, or `None` if either key is empty.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Option<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        if access_key.is_empty() || secret_key.is_empty() {
            return None;
        }
        Some(Self {
            access_key,
            secret_key,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResp {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    token: String,
}

/// Exchange credentials for a bearer token.
///
/// `base_url` is the service origin (`scheme://host[:port]`).
pub async fn sign_token(
    client: &reqwest::Client,
    credentials: &Credentials,
    base_url: &str,
) -> Result<String, ClientError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), SIGN_TOKEN_PATH);
    debug!(url = %url, access_key = %credentials.access_key, "Signing token");

    let response = client.post(&url).json(credentials).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(ClientError::Remote {
            operation: "sign token",
            status: status.as_u16(),
        });
    }

    let resp: TokenResp =
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
    if resp.token.is_empty() {
        return Err(ClientError::Auth(format!(
            "sign-in returned no token (code {})",
            resp.code
        )));
    }
    Ok(resp.token)
}

/// Mints a fresh bearer token from the request's origin for every request.
pub struct SignTokenAuth {
    credentials: Credentials,
    client: reqwest::Client,
}

impl SignTokenAuth {
    /// Create a provider that signs in with `client`.
    pub fn new(credentials: Credentials, client: reqwest::Client) -> Self {
        Self {
            credentials,
            client,
        }
    }
}

#[async_trait]
impl AuthProvider for SignTokenAuth {
    async fn authorization(
        &self,
        _method: &Method,
        url: &Url,
    ) -> Result<Option<String>, ClientError> {
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(ClientError::InvalidUrl(url.to_string()));
        }
        let token = sign_token(&self.client, &self.credentials, &origin.ascii_serialization()).await?;
        Ok(Some(format!("Bearer {}", token)))
    }
}
