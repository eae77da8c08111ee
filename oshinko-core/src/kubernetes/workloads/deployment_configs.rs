//! DeploymentConfig operations
//!
//! DeploymentConfigs are OpenShift deployment templates
//! (`apps.openshift.io/v1`). k8s-openapi has no typed model for them, so
//! they are handled as dynamic objects.

use async_trait::async_trait;
use kube::api::{
    Api, ApiResource, DeleteParams, DynamicObject, GroupVersionKind, ListParams, PostParams,
};
use oshinko_common::ResourceKind;

use crate::kubernetes::client::K8sClient;
use crate::kubernetes::error::{K8sError, K8sResult};
use crate::kubernetes::resources::{ManagedObject, ResourceClient};
use crate::kubernetes::selector::Selector;

const GROUP: &str = "apps.openshift.io";
const VERSION: &str = "v1";
const KIND: &str = "DeploymentConfig";
const PLURAL: &str = "deploymentconfigs";

impl ManagedObject for DynamicObject {
    fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

/// DeploymentConfig client bound to a kube connection
#[derive(Debug, Clone)]
pub struct DeploymentConfigClient {
    client: K8sClient,
    resource: ApiResource,
}

impl DeploymentConfigClient {
    pub fn new(client: K8sClient) -> Self {
        let gvk = GroupVersionKind::gvk(GROUP, VERSION, KIND);
        Self {
            client,
            resource: ApiResource::from_gvk_with_plural(&gvk, PLURAL),
        }
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.inner().clone(), namespace, &self.resource)
    }
}

#[async_trait]
impl ResourceClient for DeploymentConfigClient {
    type Object = DynamicObject;

    fn kind(&self) -> ResourceKind {
        ResourceKind::DeploymentConfig
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
            .ok_or_else(|| K8sError::Internal("deployment config has no name".to_string()))?;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_object_name() {
        let obj: DynamicObject = serde_json::from_value(serde_json::json!({
            "apiVersion": "apps.openshift.io/v1",
            "kind": "DeploymentConfig",
            "metadata": {"name": "spark1-m", "labels": {"cluster-name": "spark1"}},
            "spec": {"replicas": 1}
        }))
        .unwrap();

        assert_eq!(ManagedObject::name(&obj), "spark1-m");
    }

    #[test]
    fn test_api_resource_coordinates() {
        let gvk = GroupVersionKind::gvk(GROUP, VERSION, KIND);
        let ar = ApiResource::from_gvk_with_plural(&gvk, PLURAL);
        assert_eq!(ar.api_version, "apps.openshift.io/v1");
        assert_eq!(ar.plural, "deploymentconfigs");
    }
}
