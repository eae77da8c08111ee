//! Oshinko core library
//!
//! Tears down a labelled group of objects ("cluster") on Kubernetes or
//! OpenShift: scale controllers to zero, wait for pods to drain, then delete
//! everything, collecting failures instead of stopping at the first one.

pub mod kubernetes;
pub mod logging;
pub mod teardown;

pub use kubernetes::error::{K8sError, K8sResult};
pub use kubernetes::resources::{ManagedObject, ResourceClient, ScalableController};
pub use kubernetes::selector::{Selector, SelectorLabels};
pub use oshinko_common::{
    ClusterIdentity, ObjectRef, ResourceKind, TeardownFailure, TeardownPhase, TeardownReport,
};
pub use teardown::{teardown, teardown_cluster, Backoff, TeardownContext, WaitOutcome, WaitPolicy};
