//! Kubernetes error types and ApiError mapping
//!
//! Every Kubernetes failure funnels into the signup endpoint's two-bucket
//! taxonomy: a 409 from the API server means the resource name is taken,
//! anything else is an upstream failure surfaced with its reason text.

use kube::core::ErrorResponse as K8sStatus;
use thiserror::Error;

use crate::error::ApiError;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Cluster configuration could not be loaded
    #[error("Invalid cluster configuration: {0}")]
    InvalidConfig(String),

    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),
}

/// Classify a structured API server failure.
fn classify(status: &K8sStatus) -> ApiError {
    if status.code == 409 {
        ApiError::Conflict
    } else {
        ApiError::Upstream(upstream_reason(status))
    }
}

/// Reason text reported by the API server, falling back to its message.
fn upstream_reason(status: &K8sStatus) -> String {
    if status.reason.is_empty() {
        status.message.clone()
    } else {
        status.reason.clone()
    }
}

impl From<K8sError> for ApiError {
    fn from(err: K8sError) -> Self {
        match err {
            K8sError::InvalidConfig(msg) => ApiError::Internal(msg),
            K8sError::KubeError(kube::Error::Api(status)) => classify(&status),
            K8sError::KubeError(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, reason: &str, message: &str) -> K8sStatus {
        K8sStatus {
            status: "Failure".to_string(),
            message: message.to_string(),
            reason: reason.to_string(),
            code,
        }
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let api_err = classify(&status(
            409,
            "AlreadyExists",
            "deployments.apps \"db-alice\" already exists",
        ));
        let response = api_err.to_error_response();
        assert_eq!(response.status, 409);
        assert_eq!(response.message, "User already exists.");
    }

    #[test]
    fn test_other_failures_map_to_500_with_reason() {
        let api_err = classify(&status(500, "InternalError", "etcd is down"));
        let response = api_err.to_error_response();
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "Kubernetes API Error: InternalError");
    }

    #[test]
    fn test_reason_falls_back_to_message() {
        let api_err = classify(&status(503, "", "apiserver overloaded"));
        let response = api_err.to_error_response();
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "Kubernetes API Error: apiserver overloaded");
    }

    #[test]
    fn test_invalid_config_is_internal() {
        let api_err: ApiError = K8sError::InvalidConfig("no kubeconfig".to_string()).into();
        let response = api_err.to_error_response();
        assert_eq!(response.status, 500);
        assert_eq!(response.error, "INTERNAL_ERROR");
    }
}
