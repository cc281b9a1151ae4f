//! Kubernetes integration for the UserDB API
//!
//! Thin layer over kube-rs used by the signup endpoint:
//! - a shared client wrapper constructed at process startup
//! - pure spec builders for the per-user database resources
//! - create operations for Deployments and Services
//! - mapping of Kubernetes failures onto the API error taxonomy

pub mod client;
pub mod error;
pub mod networking;
pub mod specs;
pub mod workloads;
