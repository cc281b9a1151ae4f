//! Service operations
//!
//! Create operation for the cluster-internal Services that expose the
//! per-user databases.

use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, PostParams};

use crate::kubernetes::client::K8sClient;
use crate::kubernetes::error::K8sResult;

/// Create a database Service in a namespace
pub async fn create_database_service(
    client: &K8sClient,
    namespace: &str,
    service: &Service,
) -> K8sResult<Service> {
    let services: Api<Service> = Api::namespaced(client.inner().clone(), namespace);
    let created = services.create(&PostParams::default(), service).await?;

    Ok(created)
}
