//! Signup provisioning endpoint
//!
//! `POST /api/signup` provisions the per-user database resources: a
//! single-replica Deployment followed by a ClusterIP Service exposing it
//! inside the cluster. Both creates go straight to the API server; there is
//! no readiness polling and no rollback if the Service create fails after
//! the Deployment succeeded.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::kubernetes::{networking, specs, workloads};
use crate::state::AppState;

/// Build signup-related routes
pub fn signup_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/signup", post(signup))
}

/// Signup request payload
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
}

/// Signup acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Provision database resources for a new user.
///
/// The Kubernetes API server is the sole arbiter of concurrent signups for
/// the same username: the second create of the same resource name gets a 409
/// and surfaces as a conflict.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let username = request.username.to_lowercase();
    let name = specs::resource_name(&username);

    let password = state
        .config
        .database
        .password
        .as_deref()
        .ok_or_else(|| ApiError::Internal("database password is not configured".to_string()))?;

    let deployment = specs::database_deployment(
        &name,
        &state.config.database.image,
        state.config.database.port,
        password,
    );
    let service = specs::database_service(&name, state.config.database.port);

    let namespace = &state.config.kubernetes.namespace;
    info!("Provisioning database resources '{}' in namespace '{}'", name, namespace);

    workloads::create_database_deployment(&state.kube, namespace, &deployment).await?;
    networking::create_database_service(&state.kube, namespace, &service).await?;

    Ok(Json(SignupResponse {
        message: format!("Database resources for {} are being created.", username),
    }))
}
