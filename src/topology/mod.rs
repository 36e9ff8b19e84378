//! Installation topology detection
//!
//! Works out what kind of cluster we are talking to, which product variant
//! is installed, and where its operators and CheCluster live. Nothing here
//! writes to the cluster.

use crate::cluster::query::{label_of, name_of, namespace_of, select_str};
use crate::cluster::{ClusterApi, ResourceKind, ROUTE_API_GROUP};
use crate::error::{GatherError, Result};
use crate::output;
use crate::profile::{
    OperatorProfile, ProductVariant, CSV_COPIED_FROM_LABEL, CSV_INSTALL_SUCCEEDED,
    DEVWORKSPACE_OPERATOR, KUBERNETES_VARIANT, OPENSHIFT_VARIANTS,
};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Cluster flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Kubernetes,
    OpenShift,
}

impl Platform {
    pub fn is_openshift(self) -> bool {
        self == Platform::OpenShift
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Kubernetes => write!(f, "Kubernetes"),
            Platform::OpenShift => write!(f, "OpenShift"),
        }
    }
}

/// Where an operator is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInstallation {
    pub profile: OperatorProfile,
    /// `None` when the installation could not be located
    pub namespace: Option<String>,
    /// Catalog entry name, OpenShift only
    pub csv_name: Option<String>,
}

impl OperatorInstallation {
    fn unresolved(profile: OperatorProfile) -> Self {
        Self {
            profile,
            namespace: None,
            csv_name: None,
        }
    }
}

/// A name/namespace pair identifying a namespaced object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacedName {
    pub name: String,
    pub namespace: String,
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Everything the export plan needs to know about the installation
#[derive(Debug, Clone)]
pub struct Topology {
    pub platform: Platform,
    pub variant: &'static ProductVariant,
    pub devworkspace_operator: OperatorInstallation,
    pub product_operator: OperatorInstallation,
    pub checluster: Option<NamespacedName>,
}

/// Detect the full installation topology
pub async fn detect<C: ClusterApi + ?Sized>(
    cluster: &C,
    catalog_namespace: &str,
    checluster_namespace: Option<&str>,
) -> Result<Topology> {
    let platform = detect_platform(cluster).await?;
    output::info(format!("Detected platform: {platform}"));

    let variant = detect_variant(cluster, platform, catalog_namespace).await?;
    output::info(format!("Detected installation: {}", variant.display_name));

    let devworkspace_operator =
        resolve_operator(cluster, platform, &DEVWORKSPACE_OPERATOR, catalog_namespace).await;
    let product_operator =
        resolve_operator(cluster, platform, &variant.operator, catalog_namespace).await;
    let checluster = resolve_checluster(cluster, checluster_namespace).await;

    Ok(Topology {
        platform,
        variant,
        devworkspace_operator,
        product_operator,
        checluster,
    })
}

/// OpenShift is recognised by its route API
pub async fn detect_platform<C: ClusterApi + ?Sized>(cluster: &C) -> Result<Platform> {
    if cluster.has_api_group(ROUTE_API_GROUP).await? {
        Ok(Platform::OpenShift)
    } else {
        Ok(Platform::Kubernetes)
    }
}

/// Pick the installed product variant
///
/// On OpenShift the catalog entries in the shared namespace decide, in
/// [`OPENSHIFT_VARIANTS`] order. Kubernetes only ever hosts one variant.
pub async fn detect_variant<C: ClusterApi + ?Sized>(
    cluster: &C,
    platform: Platform,
    catalog_namespace: &str,
) -> Result<&'static ProductVariant> {
    if !platform.is_openshift() {
        return Ok(KUBERNETES_VARIANT);
    }

    let csvs = cluster
        .list(ResourceKind::ClusterServiceVersion, Some(catalog_namespace), None)
        .await?;
    let names: Vec<String> = csvs.iter().filter_map(name_of).collect();
    debug!(?names, "catalog entries in {catalog_namespace}");

    OPENSHIFT_VARIANTS
        .into_iter()
        .find(|variant| names.iter().any(|n| n.contains(variant.csv_marker)))
        .ok_or_else(|| {
            let known: Vec<_> = OPENSHIFT_VARIANTS.iter().map(|v| v.display_name).collect();
            GatherError::OperatorNotFound(known.join(" or "))
        })
}

/// Locate an operator's install namespace, best effort
pub async fn resolve_operator<C: ClusterApi + ?Sized>(
    cluster: &C,
    platform: Platform,
    profile: &OperatorProfile,
    catalog_namespace: &str,
) -> OperatorInstallation {
    let resolved = match platform {
        Platform::OpenShift => resolve_from_catalog(cluster, profile, catalog_namespace).await,
        Platform::Kubernetes => resolve_from_workload(cluster, profile).await,
    };

    match resolved {
        Ok(installation) => {
            match &installation.namespace {
                Some(ns) => output::info(format!("{} namespace: {ns}", profile.display_name)),
                None => output::warn(format!(
                    "Could not determine the {} namespace",
                    profile.display_name
                )),
            }
            installation
        }
        Err(e) => {
            output::warn(format!("Failed to look up {}: {e}", profile.display_name));
            OperatorInstallation::unresolved(*profile)
        }
    }
}

async fn resolve_from_catalog<C: ClusterApi + ?Sized>(
    cluster: &C,
    profile: &OperatorProfile,
    catalog_namespace: &str,
) -> Result<OperatorInstallation> {
    let csvs = cluster
        .list(ResourceKind::ClusterServiceVersion, Some(catalog_namespace), None)
        .await?;

    let Some(csv) = csvs
        .iter()
        .find(|csv| select_str(csv, "$.spec.displayName").as_deref() == Some(profile.display_name))
    else {
        return Ok(OperatorInstallation::unresolved(*profile));
    };

    Ok(OperatorInstallation {
        profile: *profile,
        namespace: csv_install_namespace(csv),
        csv_name: name_of(csv),
    })
}

/// Namespace an operator really runs in, given any of its catalog entries
///
/// Entries installed in place report success; every other entry is a copy
/// pointing back at its origin through a label.
pub fn csv_install_namespace(csv: &Value) -> Option<String> {
    if select_str(csv, "$.status.reason").as_deref() == Some(CSV_INSTALL_SUCCEEDED) {
        namespace_of(csv)
    } else {
        label_of(csv, CSV_COPIED_FROM_LABEL)
    }
}

async fn resolve_from_workload<C: ClusterApi + ?Sized>(
    cluster: &C,
    profile: &OperatorProfile,
) -> Result<OperatorInstallation> {
    let deployments = cluster
        .list(ResourceKind::Deployment, None, Some(profile.controller.selector))
        .await?;
    if deployments.len() > 1 {
        debug!(
            count = deployments.len(),
            "several {} deployments, using the first", profile.id
        );
    }

    Ok(OperatorInstallation {
        profile: *profile,
        namespace: deployments.first().and_then(namespace_of),
        csv_name: None,
    })
}

/// Find the CheCluster to export
///
/// The first object the API returns wins; list order is whatever the server
/// hands back.
pub async fn resolve_checluster<C: ClusterApi + ?Sized>(
    cluster: &C,
    namespace: Option<&str>,
) -> Option<NamespacedName> {
    let items = match cluster.list(ResourceKind::CheCluster, namespace, None).await {
        Ok(items) => items,
        Err(e) => {
            output::warn(format!("Failed to list CheCluster resources: {e}"));
            return None;
        }
    };

    let first = match items.as_slice() {
        [] => {
            output::warn("No CheCluster found, skipping CheCluster export");
            return None;
        }
        [only] => only,
        [first, ..] => {
            output::warn(format!(
                "Found {} CheCluster resources, exporting only the first one",
                items.len()
            ));
            first
        }
    };

    let (Some(name), Some(namespace)) = (name_of(first), namespace_of(first)) else {
        output::warn("CheCluster has no name or namespace, skipping CheCluster export");
        return None;
    };
    let found = NamespacedName { name, namespace };
    output::info(format!("CheCluster: {found}"));
    Some(found)
}
