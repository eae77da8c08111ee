//! Common types shared between oshinko-core and oshinko-cli

use serde::{Deserialize, Serialize};

/// Default label key carrying the cluster name
pub const CLUSTER_LABEL: &str = "cluster-name";

/// Default label key carrying the application role (master, worker, ...)
pub const ROLE_LABEL: &str = "role";

/// The named group of objects a teardown acts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterIdentity {
    pub name: String,
    pub namespace: String,
}

impl ClusterIdentity {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl std::fmt::Display for ClusterIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Resource kinds that make up a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Deployment template (OpenShift DeploymentConfig)
    DeploymentConfig,
    /// Scalable controller owning the running pods
    ReplicationController,
    /// Network endpoint
    Service,
}

impl ResourceKind {
    /// Human-readable singular name, e.g. "replication controller"
    pub fn singular(&self) -> &'static str {
        match self {
            Self::DeploymentConfig => "deployment config",
            Self::ReplicationController => "replication controller",
            Self::Service => "service",
        }
    }

    /// Human-readable plural name, e.g. "replication controllers"
    pub fn plural(&self) -> &'static str {
        match self {
            Self::DeploymentConfig => "deployment configs",
            Self::ReplicationController => "replication controllers",
            Self::Service => "services",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.singular())
    }
}

/// Identity of one platform object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl ObjectRef {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Teardown step a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeardownPhase {
    Enumerate,
    ScaleDown,
    Delete,
}

impl std::fmt::Display for TeardownPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enumerate => write!(f, "enumerate"),
            Self::ScaleDown => write!(f, "scale-down"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A single failed sub-operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownFailure {
    pub phase: TeardownPhase,
    pub kind: ResourceKind,
    /// Object name; absent for enumeration failures
    pub object: Option<String>,
    pub cause: String,
}

impl TeardownFailure {
    pub fn enumerate(kind: ResourceKind, cause: impl ToString) -> Self {
        Self {
            phase: TeardownPhase::Enumerate,
            kind,
            object: None,
            cause: cause.to_string(),
        }
    }

    pub fn scale_down(kind: ResourceKind, object: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            phase: TeardownPhase::ScaleDown,
            kind,
            object: Some(object.into()),
            cause: cause.to_string(),
        }
    }

    pub fn delete(kind: ResourceKind, object: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            phase: TeardownPhase::Delete,
            kind,
            object: Some(object.into()),
            cause: cause.to_string(),
        }
    }
}

impl std::fmt::Display for TeardownFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let object = self.object.as_deref().unwrap_or_default();
        match self.phase {
            TeardownPhase::Enumerate => {
                write!(f, "unable to find {} ({})", self.kind.plural(), self.cause)
            }
            TeardownPhase::ScaleDown => {
                write!(f, "unable to scale {} {} ({})", self.kind, object, self.cause)
            }
            TeardownPhase::Delete => {
                write!(f, "unable to delete {} {} ({})", self.kind, object, self.cause)
            }
        }
    }
}

/// Outcome of one teardown call
///
/// An empty failure list means the cluster was fully removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub cluster: ClusterIdentity,
    #[serde(default)]
    pub failures: Vec<TeardownFailure>,
    #[serde(default)]
    pub deleted: Vec<ObjectRef>,
}

impl TeardownReport {
    pub fn new(cluster: ClusterIdentity) -> Self {
        Self {
            cluster,
            failures: Vec::new(),
            deleted: Vec::new(),
        }
    }

    pub fn record(&mut self, failure: TeardownFailure) {
        self.failures.push(failure);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures_in(&self, phase: TeardownPhase) -> impl Iterator<Item = &TeardownFailure> {
        self.failures.iter().filter(move |f| f.phase == phase)
    }

    /// All failures joined into one diagnostic line, empty on success
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for TeardownReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
