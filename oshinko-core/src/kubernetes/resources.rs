//! Resource-kind client seam
//!
//! The teardown workflow talks to the platform only through these traits.
//! The kube-backed implementations live in `workloads` and `networking`;
//! tests substitute in-memory clients.

use async_trait::async_trait;
use oshinko_common::ResourceKind;

use super::error::K8sResult;
use super::selector::Selector;

/// An object the workflow can name and delete
pub trait ManagedObject: Clone + Send + Sync + 'static {
    fn name(&self) -> &str;
}

/// A controller with a desired and an observed replica count
pub trait ScalableController: ManagedObject {
    fn set_desired_replicas(&mut self, replicas: i32);

    /// Number of instances the controller currently runs
    fn observed_replicas(&self) -> i32;
}

/// List/get/update/delete access to one resource kind
#[async_trait]
pub trait ResourceClient: Send + Sync {
    type Object: ManagedObject;

    fn kind(&self) -> ResourceKind;

    async fn list(&self, namespace: &str, selector: &Selector) -> K8sResult<Vec<Self::Object>>;

    async fn get(&self, namespace: &str, name: &str) -> K8sResult<Self::Object>;

    /// Submit `object` as-is; a stale object is rejected, never merged
    async fn update(&self, namespace: &str, object: &Self::Object) -> K8sResult<Self::Object>;

    async fn delete(&self, namespace: &str, name: &str) -> K8sResult<()>;
}

#[async_trait]
impl<T> ResourceClient for &T
where
    T: ResourceClient + ?Sized,
{
    type Object = T::Object;

    fn kind(&self) -> ResourceKind {
        (**self).kind()
    }

    async fn list(&self, namespace: &str, selector: &Selector) -> K8sResult<Vec<Self::Object>> {
        (**self).list(namespace, selector).await
    }

    async fn get(&self, namespace: &str, name: &str) -> K8sResult<Self::Object> {
        (**self).get(namespace, name).await
    }

    async fn update(&self, namespace: &str, object: &Self::Object) -> K8sResult<Self::Object> {
        (**self).update(namespace, object).await
    }

    async fn delete(&self, namespace: &str, name: &str) -> K8sResult<()> {
        (**self).delete(namespace, name).await
    }
}
