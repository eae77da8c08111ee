//! Kubernetes workload clients
//!
//! Handles DeploymentConfigs (templates) and ReplicationControllers.

pub mod deployment_configs;
pub mod replication_controllers;

pub use deployment_configs::DeploymentConfigClient;
pub use replication_controllers::ReplicationControllerClient;
