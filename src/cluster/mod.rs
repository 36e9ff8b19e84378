//! Cluster query facade
//!
//! Every read and write the collector performs against the cluster goes
//! through [`ClusterApi`]. Objects travel as untyped JSON so that custom
//! resources (CheCluster, DevWorkspace, CSVs) and core kinds share one path.

mod kube_cluster;
pub mod query;


pub use kube_cluster::KubeCluster;

use crate::error::Result;
use async_trait::async_trait;
use kube::core::{ApiResource, GroupVersionKind};
use serde_json::Value;
use std::fmt;

/// API group that only exists on OpenShift clusters
pub const ROUTE_API_GROUP: &str = "route.openshift.io";

/// Resource kinds the collector knows how to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pod,
    Service,
    ServiceAccount,
    ConfigMap,
    PersistentVolumeClaim,
    Event,
    Deployment,
    Ingress,
    Route,
    ClusterServiceVersion,
    CheCluster,
    DevWorkspace,
    DevWorkspaceOperatorConfig,
}

impl ResourceKind {
    /// (group, version, kind, plural)
    fn gvkp(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            ResourceKind::Pod => ("", "v1", "Pod", "pods"),
            ResourceKind::Service => ("", "v1", "Service", "services"),
            ResourceKind::ServiceAccount => ("", "v1", "ServiceAccount", "serviceaccounts"),
            ResourceKind::ConfigMap => ("", "v1", "ConfigMap", "configmaps"),
            ResourceKind::PersistentVolumeClaim => {
                ("", "v1", "PersistentVolumeClaim", "persistentvolumeclaims")
            }
            ResourceKind::Event => ("", "v1", "Event", "events"),
            ResourceKind::Deployment => ("apps", "v1", "Deployment", "deployments"),
            ResourceKind::Ingress => ("networking.k8s.io", "v1", "Ingress", "ingresses"),
            ResourceKind::Route => (ROUTE_API_GROUP, "v1", "Route", "routes"),
            ResourceKind::ClusterServiceVersion => (
                "operators.coreos.com",
                "v1alpha1",
                "ClusterServiceVersion",
                "clusterserviceversions",
            ),
            ResourceKind::CheCluster => ("org.eclipse.che", "v2", "CheCluster", "checlusters"),
            ResourceKind::DevWorkspace => {
                ("workspace.devfile.io", "v1alpha2", "DevWorkspace", "devworkspaces")
            }
            ResourceKind::DevWorkspaceOperatorConfig => (
                "controller.devfile.io",
                "v1alpha1",
                "DevWorkspaceOperatorConfig",
                "devworkspaceoperatorconfigs",
            ),
        }
    }

    /// The Kubernetes kind name
    pub fn kind(self) -> &'static str {
        self.gvkp().2
    }

    /// The `apiVersion` string written into exported documents
    pub fn api_version(self) -> String {
        let (group, version, _, _) = self.gvkp();
        if group.is_empty() {
            version.to_string()
        } else {
            format!("{group}/{version}")
        }
    }

    /// Dynamic API descriptor for this kind
    pub fn api_resource(self) -> ApiResource {
        let (group, version, kind, plural) = self.gvkp();
        ApiResource::from_gvk_with_plural(&GroupVersionKind::gvk(group, version, kind), plural)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Read (and narrowly write) access to a cluster
///
/// `namespace: None` means all namespaces. Selectors use the Kubernetes
/// label selector syntax.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Whether an API group is served by the cluster
    async fn has_api_group(&self, group: &str) -> Result<bool>;

    /// List objects of a kind, in API server order
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: Option<&str>,
        selector: Option<&str>,
    ) -> Result<Vec<Value>>;

    /// Fetch a single object, `None` when it does not exist
    async fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> Result<Option<Value>>;

    /// Fetch the current logs of one container
    async fn logs(&self, namespace: &str, pod: &str, container: &str) -> Result<String>;

    /// Apply a JSON merge patch to an object
    async fn patch_merge(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<()>;
}
