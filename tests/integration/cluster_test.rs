//! Integration tests for the cluster facade and topology detection
//!
//! These tests require a real Kubernetes cluster.
//! Run with: cargo test integration::cluster_test -- --ignored

use che_gather::client::create_client;
use che_gather::cluster::{ClusterApi, KubeCluster, ResourceKind};
use che_gather::topology::detect_platform;

async fn cluster() -> KubeCluster {
    KubeCluster::new(create_client(None).await.expect("Should create client"))
}

/// Test that the platform can be detected from API discovery
#[tokio::test]
#[ignore]
async fn test_detect_platform() {
    let cluster = cluster().await;
    let platform = detect_platform(&cluster).await;
    assert!(platform.is_ok(), "Should detect platform");
}

/// Test listing pods across all namespaces
#[tokio::test]
#[ignore]
async fn test_list_pods_all_namespaces() {
    let cluster = cluster().await;
    let pods = cluster.list(ResourceKind::Pod, None, None).await.expect("Should list pods");
    assert!(pods.iter().all(|p| p["kind"] == "Pod"), "Items should carry their kind");
}

/// Test that a missing object reads as None
#[tokio::test]
#[ignore]
async fn test_get_missing_configmap() {
    let cluster = cluster().await;
    let cm = cluster
        .get(ResourceKind::ConfigMap, "default", "nonexistent-configmap-12345")
        .await
        .expect("Should query configmap");
    assert!(cm.is_none());
}

/// Test selecting with a label selector that matches nothing
#[tokio::test]
#[ignore]
async fn test_list_with_unmatched_selector() {
    let cluster = cluster().await;
    let cms = cluster
        .list(
            ResourceKind::ConfigMap,
            Some("default"),
            Some("che-gather.test/none=true"),
        )
        .await
        .expect("Should list configmaps");
    assert!(cms.is_empty());
}
