//! Resource spec builders
//!
//! Pure construction of the per-user database Deployment and Service. Both
//! specs are derived from the same resource name so the Service selector
//! always matches the Deployment's pod labels.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Name of the database container inside the pod
const CONTAINER_NAME: &str = "postgres";

/// Environment variable the database image reads its superuser password from
const PASSWORD_ENV: &str = "POSTGRES_PASSWORD";

/// Derive the resource name shared by a user's Deployment and Service.
pub fn resource_name(username: &str) -> String {
    format!("db-{}", username.to_lowercase())
}

fn app_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), name.to_string())])
}

/// Build the single-replica database Deployment for a resource name.
pub fn database_deployment(name: &str, image: &str, port: i32, password: &str) -> Deployment {
    let labels = app_labels(name);

    let container = Container {
        name: CONTAINER_NAME.to_string(),
        image: Some(image.to_string()),
        ports: Some(vec![ContainerPort {
            container_port: port,
            ..Default::default()
        }]),
        env: Some(vec![EnvVar {
            name: PASSWORD_ENV.to_string(),
            value: Some(password.to_string()),
            ..Default::default()
        }]),
        ..Default::default()
    };

    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Build the ClusterIP Service selecting a user's database pods.
pub fn database_service(name: &str, port: i32) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(app_labels(name)),
            ports: Some(vec![ServicePort {
                port,
                target_port: Some(IntOrString::Int(port)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_name_is_lowercased() {
        assert_eq!(resource_name("alice"), "db-alice");
        assert_eq!(resource_name("Alice"), "db-alice");
        assert_eq!(resource_name("ALICE"), "db-alice");
    }

    #[test]
    fn test_resource_name_is_idempotent() {
        let once = resource_name("Bob");
        assert_eq!(resource_name(&once[3..]), once);
    }

    #[test]
    fn test_deployment_spec() {
        let deployment = database_deployment("db-alice", "postgres:13", 5432, "s3cret");

        assert_eq!(deployment.metadata.name.as_deref(), Some("db-alice"));
        let spec = deployment.spec.expect("deployment spec");
        assert_eq!(spec.replicas, Some(1));

        let selector = spec.selector.match_labels.expect("selector labels");
        assert_eq!(selector.get("app").map(String::as_str), Some("db-alice"));

        let pod_labels = spec
            .template
            .metadata
            .and_then(|m| m.labels)
            .expect("pod labels");
        assert_eq!(pod_labels, selector);

        let containers = spec.template.spec.expect("pod spec").containers;
        assert_eq!(containers.len(), 1);
        let container = &containers[0];
        assert_eq!(container.name, "postgres");
        assert_eq!(container.image.as_deref(), Some("postgres:13"));
        assert_eq!(
            container.ports.as_ref().unwrap()[0].container_port,
            5432
        );

        let env = container.env.as_ref().expect("env");
        assert_eq!(env[0].name, "POSTGRES_PASSWORD");
        assert_eq!(env[0].value.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_service_selector_matches_deployment_labels() {
        let deployment = database_deployment("db-alice", "postgres:13", 5432, "s3cret");
        let service = database_service("db-alice", 5432);

        let deployment_labels = deployment
            .spec
            .and_then(|s| s.selector.match_labels)
            .expect("deployment selector");
        let service_selector = service
            .spec
            .as_ref()
            .and_then(|s| s.selector.clone())
            .expect("service selector");
        assert_eq!(service_selector, deployment_labels);

        let ports = service.spec.unwrap().ports.expect("service ports");
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port, 5432);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(5432)));
    }
}
