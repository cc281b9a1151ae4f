//! Deployment operations
//!
//! Create operation for the per-user database Deployments.

use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, PostParams};

use crate::kubernetes::client::K8sClient;
use crate::kubernetes::error::K8sResult;

/// Create a database Deployment in a namespace
pub async fn create_database_deployment(
    client: &K8sClient,
    namespace: &str,
    deployment: &Deployment,
) -> K8sResult<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.inner().clone(), namespace);
    let created = deployments.create(&PostParams::default(), deployment).await?;

    Ok(created)
}
