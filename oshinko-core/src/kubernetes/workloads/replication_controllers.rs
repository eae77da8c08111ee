//! ReplicationController operations
//!
//! ReplicationControllers are the scalable controllers of a cluster: they own
//! the running pods and must be scaled to zero before removal.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ReplicationController;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use oshinko_common::ResourceKind;

use crate::kubernetes::client::K8sClient;
use crate::kubernetes::error::{K8sError, K8sResult};
use crate::kubernetes::resources::{ManagedObject, ResourceClient, ScalableController};
use crate::kubernetes::selector::Selector;

impl ManagedObject for ReplicationController {
    fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

impl ScalableController for ReplicationController {
    fn set_desired_replicas(&mut self, replicas: i32) {
        self.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
    }

    fn observed_replicas(&self) -> i32 {
        self.status.as_ref().map(|s| s.replicas).unwrap_or(0)
    }
}

/// ReplicationController client bound to a kube connection
#[derive(Debug, Clone)]
pub struct ReplicationControllerClient {
    client: K8sClient,
}

impl ReplicationControllerClient {
    pub fn new(client: K8sClient) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<ReplicationController> {
        Api::namespaced(self.client.inner().clone(), namespace)
    }
}

#[async_trait]
impl ResourceClient for ReplicationControllerClient {
    type Object = ReplicationController;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ReplicationController
    }

    async fn list(&self, namespace: &str, selector: &Selector) -> K8sResult<Vec<Self::Object>> {
        let lp = ListParams::default().labels(&selector.to_string());
        let list = self.api(namespace).list(&lp).await?;

        Ok(list.items)
    }

    async fn get(&self, namespace: &str, name: &str) -> K8sResult<Self::Object> {
        Ok(self.api(namespace).get(name).await?)
    }

    /// PUT the whole object; the embedded resourceVersion makes a concurrent
    /// change fail with 409 instead of being overwritten
    async fn update(&self, namespace: &str, object: &Self::Object) -> K8sResult<Self::Object> {
        let name = object.metadata.name.as_deref().ok_or_else(|| {
            K8sError::Internal("replication controller has no name".to_string())
        })?;

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
