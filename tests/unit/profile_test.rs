//! Tests for src/profile/mod.rs - product variants

use che_gather::profile::{
    devworkspace, service_for_deployment, CANONICAL_SERVER_SERVICE, DEVWORKSPACE_OPERATOR,
    DEV_SPACES, ECLIPSE_CHE, KUBERNETES_VARIANT, OPENSHIFT_VARIANTS,
};

#[test]
fn test_openshift_variant_order() {
    assert_eq!(OPENSHIFT_VARIANTS[0].distribution_id, "che");
    assert_eq!(OPENSHIFT_VARIANTS[1].distribution_id, "devspaces");
}

#[test]
fn test_kubernetes_only_supports_eclipse_che() {
    assert_eq!(*KUBERNETES_VARIANT, ECLIPSE_CHE);
}

#[test]
fn test_variants_share_devworkspace_operator() {
    assert!(DEVWORKSPACE_OPERATOR.webhook.is_some());
    assert_eq!(
        DEVWORKSPACE_OPERATOR.global_config,
        Some("devworkspace-operator-config")
    );
    assert!(ECLIPSE_CHE.operator.webhook.is_none());
}

#[test]
fn test_server_deployments_use_canonical_service() {
    assert_eq!(service_for_deployment("che"), CANONICAL_SERVER_SERVICE);
    assert_eq!(service_for_deployment("devspaces"), CANONICAL_SERVER_SERVICE);
    assert_eq!(service_for_deployment("plugin-registry"), "plugin-registry");
}

#[test]
fn test_managed_deployments_start_with_server() {
    assert_eq!(ECLIPSE_CHE.managed_deployments[0], "che");
    assert_eq!(DEV_SPACES.managed_deployments[0], "devspaces");
}

#[test]
fn test_devworkspace_id_selector() {
    assert_eq!(
        devworkspace::id_selector("workspace1234"),
        "controller.devfile.io/devworkspace_id=workspace1234"
    );
}
