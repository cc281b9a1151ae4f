//! Standardized error handling for API responses
//!
//! Provides consistent JSON error responses across all API endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Standard API error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,

    /// Error code for programmatic handling
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional detailed error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Timestamp when error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// API error types with standardized responses
///
/// Signup failures funnel into a two-bucket taxonomy: `Conflict` when the
/// derived resource name already exists in the cluster, `Upstream` for every
/// other Kubernetes API failure.
#[derive(Debug)]
pub enum ApiError {
    /// 409 Conflict - the user's database resources already exist
    Conflict,

    /// 500 Internal Server Error carrying the upstream Kubernetes reason
    Upstream(String),

    /// 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Convert error to ErrorResponse
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Conflict => ErrorResponse::new(409, "CONFLICT", "User already exists."),
            ApiError::Upstream(reason) => {
                error!("Kubernetes API error: {}", reason);
                ErrorResponse::new(
                    500,
                    "KUBERNETES_ERROR",
                    format!("Kubernetes API Error: {}", reason),
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal API error: {}", msg);
                ErrorResponse::new(500, "INTERNAL_ERROR", "An internal server error occurred")
                    .with_details(msg.as_str())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = self.to_error_response();
        let status_code = StatusCode::from_u16(error_response.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(error_response)).into_response()
    }
}
