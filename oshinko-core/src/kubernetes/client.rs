//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client with the context and namespace it was built from.

use kube::config::KubeConfigOptions;
use kube::{Client, Config};

use super::error::{K8sError, K8sResult};

/// Wrapper around kube-rs Client with context information
#[derive(Clone)]
pub struct K8sClient {
    inner: Client,
    context: Option<String>,
    default_namespace: String,
    api_server: String,
}

impl K8sClient {
    /// Create a client from the ambient configuration
    ///
    /// Uses the kubeconfig's current context, falling back to in-cluster
    /// configuration when running inside a pod.
    pub async fn infer() -> K8sResult<Self> {
        let config = Config::infer()
            .await
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to infer config: {}", e)))?;

        Self::from_config(config, None)
    }

    /// Create a client for a named kubeconfig context
    pub async fn from_context(context: &str) -> K8sResult<Self> {
        let config = Config::from_kubeconfig(&KubeConfigOptions {
            context: Some(context.to_string()),
            ..Default::default()
        })
        .await
        .map_err(|e| {
            K8sError::InvalidKubeconfig(format!("Failed to load context '{}': {}", context, e))
        })?;

        Self::from_config(config, Some(context.to_string()))
    }

    fn from_config(config: Config, context: Option<String>) -> K8sResult<Self> {
        let api_server = config.cluster_url.to_string();
        let default_namespace = config.default_namespace.clone();

        let client = Client::try_from(config)
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create client: {}", e)))?;

        tracing::debug!(
            api_server = %api_server,
            namespace = %default_namespace,
            "Kubernetes client created"
        );

        Ok(Self {
            inner: client,
            context,
            default_namespace,
            api_server,
        })
    }

    /// Get the inner kube-rs Client
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Namespace of the selected context
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Context name, if one was chosen explicitly
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Get API server URL
    pub fn api_server(&self) -> &str {
        &self.api_server
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("context", &self.context)
            .field("default_namespace", &self.default_namespace)
            .field("api_server", &self.api_server)
            .finish()
    }
}
