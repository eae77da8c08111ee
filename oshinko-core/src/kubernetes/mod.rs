//! Kubernetes integration for Oshinko
//!
//! Provides the pieces the teardown workflow consumes:
//! - Label selectors for cluster objects
//! - The resource-kind client traits
//! - kube-rs backed clients for DeploymentConfigs, ReplicationControllers
//!   and Services (feature `kubernetes`)

pub mod error;
pub mod resources;
pub mod selector;

#[cfg(feature = "kubernetes")]
pub mod client;
#[cfg(feature = "kubernetes")]
pub mod networking;
#[cfg(feature = "kubernetes")]
pub mod workloads;

#[cfg(feature = "kubernetes")]
pub use kube_clients::KubeClients;

#[cfg(feature = "kubernetes")]
mod kube_clients {
    use super::client::K8sClient;
    use super::networking::ServiceClient;
    use super::workloads::{DeploymentConfigClient, ReplicationControllerClient};

    /// The three resource-kind clients sharing one connection
    #[derive(Debug, Clone)]
    pub struct KubeClients {
        pub templates: DeploymentConfigClient,
        pub controllers: ReplicationControllerClient,
        pub services: ServiceClient,
    }

    impl KubeClients {
        pub fn new(client: K8sClient) -> Self {
            Self {
                templates: DeploymentConfigClient::new(client.clone()),
                controllers: ReplicationControllerClient::new(client.clone()),
                services: ServiceClient::new(client),
            }
        }
    }
}
