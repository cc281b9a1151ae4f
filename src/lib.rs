//! UserDB API Library
//!
//! Exposes the signup provisioning endpoint and its supporting modules for
//! use by the binary and by integration tests.

// Core modules
pub mod config;
pub mod error;
pub mod logging;

// Application state
pub mod state;
pub use state::AppState;

// Signup endpoint
pub mod signup;

// Kubernetes integration
pub mod kubernetes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(signup::signup_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Simple liveness check
async fn health_check() -> &'static str {
    "OK"
}
