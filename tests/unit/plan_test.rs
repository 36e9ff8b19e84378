//! Tests for src/plan/mod.rs - full export plans

use che_gather::cluster::ResourceKind;
use che_gather::plan::{build_plan, ExportTask, Format, Target, WorkspaceExport};
use che_gather::profile::{DEV_SPACES, ECLIPSE_CHE};
use che_gather::topology::{NamespacedName, Platform};
use std::path::PathBuf;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

fn outputs(tasks: &[ExportTask]) -> Vec<String> {
    tasks.iter().map(|t| t.output.display().to_string()).collect()
}

fn workspace(id: Option<&str>) -> WorkspaceExport {
    WorkspaceExport {
        target: NamespacedName {
            name: "my-ws".to_string(),
            namespace: "user1-devspaces".to_string(),
        },
        devworkspace_id: id.map(String::from),
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_operators_come_before_checluster_and_workspace() {
    let topology = common::create_topology(
        Platform::OpenShift,
        &DEV_SPACES,
        Some(("devspaces", "openshift-devspaces")),
    );
    let paths = outputs(&build_plan(&topology, Some(&workspace(Some("workspace1234")))));

    let first_index = |prefix: &str| paths.iter().position(|p| p.starts_with(prefix)).unwrap();
    assert_eq!(first_index("operators/devworkspace-operator"), 0);
    assert!(first_index("operators/devspaces-operator") > 0);
    assert!(first_index("checluster") > first_index("operators/devspaces-operator"));
    assert!(first_index("devworkspaces") > first_index("checluster"));
}

#[test]
fn test_plan_without_checluster_or_workspace() {
    let topology = common::create_topology(Platform::Kubernetes, &ECLIPSE_CHE, None);
    let paths = outputs(&build_plan(&topology, None));
    assert!(paths.iter().all(|p| p.starts_with("operators/")));
}

// ============================================================================
// Platform differences
// ============================================================================

#[test]
fn test_openshift_plan_reads_versions_from_catalog() {
    let topology = common::create_topology(Platform::OpenShift, &DEV_SPACES, None);
    let tasks = build_plan(&topology, None);

    let version = tasks
        .iter()
        .find(|t| t.output == PathBuf::from("operators/devspaces-operator/version.txt"))
        .unwrap();
    assert_eq!(version.kind, ResourceKind::ClusterServiceVersion);
    assert_eq!(version.format, Format::Field("$.spec.version"));
    assert_eq!(version.namespace.as_deref(), Some("devspaces-operator"));
}

#[test]
fn test_kubernetes_plan_uses_ingresses() {
    let topology = common::create_topology(
        Platform::Kubernetes,
        &ECLIPSE_CHE,
        Some(("eclipse-che", "eclipse-che")),
    );
    let paths = outputs(&build_plan(&topology, Some(&workspace(Some("workspace1234")))));

    assert!(paths.contains(&"checluster/ingress.yaml".to_string()));
    assert!(paths.contains(&"devworkspaces/ingresses.yaml".to_string()));
    assert!(!paths.iter().any(|p| p.contains("route") || p.ends_with("csv.yaml")));
}

// ============================================================================
// Workspace tasks
// ============================================================================

#[test]
fn test_workspace_objects_selected_by_id() {
    let topology = common::create_topology(Platform::OpenShift, &DEV_SPACES, None);
    let tasks = build_plan(&topology, Some(&workspace(Some("workspace1234"))));

    let pods = tasks
        .iter()
        .find(|t| t.output == PathBuf::from("devworkspaces/pods.yaml"))
        .unwrap();
    assert_eq!(
        pods.target,
        Target::Selected("controller.devfile.io/devworkspace_id=workspace1234".to_string())
    );
    assert_eq!(pods.namespace.as_deref(), Some("user1-devspaces"));
    assert!(tasks
        .iter()
        .any(|t| t.format == Format::Logs && t.output == PathBuf::from("devworkspaces")));
}

#[test]
fn test_unknown_workspace_id_keeps_namespace_wide_tasks() {
    let topology = common::create_topology(Platform::OpenShift, &DEV_SPACES, None);
    let paths = outputs(&build_plan(&topology, Some(&workspace(None))));

    let ws: Vec<&String> = paths.iter().filter(|p| p.starts_with("devworkspaces")).collect();
    assert_eq!(
        ws,
        vec![
            "devworkspaces/devworkspace.yaml",
            "devworkspaces/mounted-configmaps.yaml",
            "devworkspaces/pvcs.yaml",
            "devworkspaces/events.yaml",
            "devworkspaces/events.txt",
        ]
    );
}

#[test]
fn test_task_display() {
    let topology = common::create_topology(
        Platform::Kubernetes,
        &ECLIPSE_CHE,
        Some(("eclipse-che", "eclipse-che")),
    );
    let tasks = build_plan(&topology, None);
    let cr = tasks
        .iter()
        .find(|t| t.kind == ResourceKind::CheCluster)
        .unwrap();
    assert_eq!(cr.to_string(), "CheCluster/eclipse-che -> checluster/eclipse-che.yaml");
}
