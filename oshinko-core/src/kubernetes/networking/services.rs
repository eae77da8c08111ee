//! Service operations
//!
//! Services are the network endpoints of a cluster. They carry no replica
//! count and are removed last.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use oshinko_common::ResourceKind;

use crate::kubernetes::client::K8sClient;
use crate::kubernetes::error::{K8sError, K8sResult};
use crate::kubernetes::resources::{ManagedObject, ResourceClient};
use crate::kubernetes::selector::Selector;

impl ManagedObject for Service {
    fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

/// Service client bound to a kube connection
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: K8sClient,
}

impl ServiceClient {
    pub fn new(client: K8sClient) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.inner().clone(), namespace)
    }
}

#[async_trait]
impl ResourceClient for ServiceClient {
    type Object = Service;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Service
    }

    async fn list(&self, namespace: &str, selector: &Selector) -> K8sResult<Vec<Self::Object>> {
        let lp = ListParams::default().labels(&selector.to_string());
        let list = self.api(namespace).list(&lp).await?;

        Ok(list.items)
    }

    async fn get(&self, namespace: &str, name: &str) -> K8sResult<Self::Object> {
        Ok(self.api(namespace).get(name).await?)
    }

    async fn update(&self, namespace: &str, object: &Self::Object) -> K8sResult<Self::Object> {
        let name = object
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| K8sError::Internal("service has no name".to_string()))?;

        let updated = self
            .api(namespace)
            .replace(name, &PostParams::default(), object)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, namespace: &str, name: &str) -> K8sResult<()> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;

        Ok(())
    }
}
