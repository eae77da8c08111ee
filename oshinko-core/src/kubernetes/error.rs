//! Kubernetes error types
//!
//! Errors raised by the resource clients. The teardown workflow never
//! propagates these; it turns each one into a `TeardownFailure`.

use thiserror::Error;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Kubernetes resource not found
    #[error("Resource not found: {kind}/{name} in namespace {namespace}")]
    ResourceNotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    /// Error from kube-rs client
    #[cfg(feature = "kubernetes")]
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Invalid kubeconfig
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource conflict (stale resourceVersion)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl K8sError {
    /// True when the object does not exist on the API server
    pub fn is_not_found(&self) -> bool {
        match self {
            K8sError::ResourceNotFound { .. } => true,
            #[cfg(feature = "kubernetes")]
            K8sError::KubeError(kube::Error::Api(resp)) => resp.code == 404,
            _ => false,
        }
    }

    /// True when an update lost an optimistic-concurrency race
    pub fn is_conflict(&self) -> bool {
        match self {
            K8sError::Conflict(_) => true,
            #[cfg(feature = "kubernetes")]
            K8sError::KubeError(kube::Error::Api(resp)) => resp.code == 409,
            _ => false,
        }
    }
}

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = K8sError::ResourceNotFound {
            kind: "Service".into(),
            name: "spark1-ui".into(),
            namespace: "demo".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
        assert_eq!(
            err.to_string(),
            "Resource not found: Service/spark1-ui in namespace demo"
        );
    }

    #[cfg(feature = "kubernetes")]
    #[test]
    fn test_kube_api_error_codes() {
        use kube::error::ErrorResponse;

        let conflict = K8sError::from(kube::Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "the object has been modified".into(),
            reason: "Conflict".into(),
            code: 409,
        }));
        assert!(conflict.is_conflict());
        assert!(!conflict.is_not_found());

        let missing = K8sError::from(kube::Error::Api(ErrorResponse {
            status: "Failure".into(),
            message: "not found".into(),
            reason: "NotFound".into(),
            code: 404,
        }));
        assert!(missing.is_not_found());
    }
}
