//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client with the API server address for logging.

use kube::{Client, Config};

use super::error::{K8sError, K8sResult};

/// Wrapper around kube-rs Client shared across request handlers
#[derive(Clone)]
pub struct K8sClient {
    inner: Client,
    api_server: String,
}

impl K8sClient {
    /// Create client from in-cluster configuration (for running inside K8s)
    pub async fn from_incluster() -> K8sResult<Self> {
        let config = Config::incluster().map_err(|e| {
            K8sError::InvalidConfig(format!("Failed to get in-cluster config: {}", e))
        })?;

        Self::from_config(config)
    }

    /// Create client from the inferred environment (kubeconfig fallback for
    /// local development)
    pub async fn infer() -> K8sResult<Self> {
        let config = Config::infer().await.map_err(|e| {
            K8sError::InvalidConfig(format!("Failed to infer cluster config: {}", e))
        })?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> K8sResult<Self> {
        let api_server = config.cluster_url.to_string();
        let client = Client::try_from(config)?;

        Ok(Self { inner: client, api_server })
    }

    /// Wrap an existing kube-rs Client.
    ///
    /// Used by tests that back the client with a mock transport.
    pub fn from_client(inner: Client) -> Self {
        Self {
            inner,
            api_server: "(external client)".to_string(),
        }
    }

    /// Get the inner kube-rs Client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get API server URL
    pub fn api_server(&self) -> &str {
        &self.api_server
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("api_server", &self.api_server)
            .finish()
    }
}
