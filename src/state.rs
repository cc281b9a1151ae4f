//! Shared application state

use std::sync::Arc;

use crate::config::AppConfig;
use crate::kubernetes::client::K8sClient;

/// State shared across request handlers.
///
/// The Kubernetes client is constructed once during process initialization
/// and reused for every request; handlers never build their own.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub kube: K8sClient,
}
