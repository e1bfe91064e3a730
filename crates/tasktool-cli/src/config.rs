//! CLI configuration.

use std::sync::Arc;
use std::time::Duration;

use tasktool_client::{
    AuthProvider, ClientError, Credentials, HttpTransport, NoAuth, SignTokenAuth,
    TaskServiceClient, TransportConfig,
};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Settings shared by every command, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Task service endpoint.
    pub endpoint: String,

    /// Sign-in credentials; `None` sends requests unauthenticated.
    pub credentials: Option<Credentials>,

    /// HTTP client settings.
    pub transport: TransportConfig,

    /// Debug logging requested.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: crate::cli::DEFAULT_ENDPOINT.to_string(),
            credentials: None,
            transport: TransportConfig::default(),
            verbose: false,
        }
    }
}

impl From<&GlobalArgs> for Config {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            endpoint: args.endpoint.clone(),
            credentials: Credentials::new(args.access_key.as_str(), args.secret_key.as_str()),
            transport: TransportConfig {
                timeout: Duration::from_secs(args.timeout),
                insecure_ignore_tls: args.insecure_ignore_tls,
            },
            verbose: args.verbose,
        }
    }
}

impl Config {
    /// Build a task service client for this configuration.
    pub fn connect(&self) -> Result<TaskServiceClient, ClientError> {
        let http = self.transport.build_client()?;
        let auth: Arc<dyn AuthProvider> = match &self.credentials {
            Some(credentials) => Arc::new(SignTokenAuth::new(credentials.clone(), http.clone())),
            None => Arc::new(NoAuth),
        };
        debug!(
            endpoint = %self.endpoint,
            authenticated = self.credentials.is_some(),
            timeout_secs = self.transport.timeout.as_secs(),
            "Creating task service client"
        );
        TaskServiceClient::new(&self.endpoint, HttpTransport::with_client(http, auth))
    }
}
