//! Product variants and operator identifiers
//!
//! Each supported distribution is described by one immutable
//! [`ProductVariant`]; the topology detector picks one and everything
//! downstream reads identifiers from it.

/// Catalog entry status reason for an operator installed in its own namespace
pub const CSV_INSTALL_SUCCEEDED: &str = "InstallSucceeded";

/// Label on copied catalog entries naming the namespace they were copied from
pub const CSV_COPIED_FROM_LABEL: &str = "olm.copiedFrom";

/// Deployments serving the main server for each variant
pub const CANONICAL_SERVER_DEPLOYMENTS: [&str; 2] = ["che", "devspaces"];

/// Service that fronts either canonical server deployment
pub const CANONICAL_SERVER_SERVICE: &str = "che-host";

/// A workload (deployment + pods + service) belonging to an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadProfile {
    pub deployment: &'static str,
    pub selector: &'static str,
    pub service: &'static str,
}

/// Identifiers of one operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorProfile {
    /// Directory name under `operators/`
    pub id: &'static str,
    /// `spec.displayName` of the operator's catalog entry
    pub display_name: &'static str,
    pub controller: WorkloadProfile,
    pub webhook: Option<WorkloadProfile>,
    /// Name of a cluster-scoped configuration object kept next to the operator
    pub global_config: Option<&'static str>,
}

/// One installable product distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductVariant {
    pub distribution_id: &'static str,
    pub display_name: &'static str,
    /// Substring of the catalog entry name identifying this variant
    pub csv_marker: &'static str,
    pub operator: OperatorProfile,
    /// Deployments the operator manages for an installation, in export order
    pub managed_deployments: &'static [&'static str],
}

pub const ECLIPSE_CHE: ProductVariant = ProductVariant {
    distribution_id: "che",
    display_name: "Eclipse Che",
    csv_marker: "eclipse-che",
    operator: OperatorProfile {
        id: "che-operator",
        display_name: "Eclipse Che",
        controller: WorkloadProfile {
            deployment: "che-operator",
            selector: "app.kubernetes.io/component=che-operator",
            service: "che-operator-service",
        },
        webhook: None,
        global_config: None,
    },
    managed_deployments: &[
        "che",
        "che-dashboard",
        "che-gateway",
        "devfile-registry",
        "plugin-registry",
    ],
};

pub const DEV_SPACES: ProductVariant = ProductVariant {
    distribution_id: "devspaces",
    display_name: "Red Hat OpenShift Dev Spaces",
    csv_marker: "devspacesoperator",
    operator: OperatorProfile {
        id: "devspaces-operator",
        display_name: "Red Hat OpenShift Dev Spaces",
        controller: WorkloadProfile {
            deployment: "devspaces-operator",
            selector: "app.kubernetes.io/component=devspaces-operator",
            service: "devspaces-operator-service",
        },
        webhook: None,
        global_config: None,
    },
    managed_deployments: &[
        "devspaces",
        "devspaces-dashboard",
        "che-gateway",
        "devfile-registry",
        "plugin-registry",
    ],
};

/// The DevWorkspace Operator every variant depends on
pub const DEVWORKSPACE_OPERATOR: OperatorProfile = OperatorProfile {
    id: "devworkspace-operator",
    display_name: "DevWorkspace Operator",
    controller: WorkloadProfile {
        deployment: "devworkspace-controller-manager",
        selector: "app.kubernetes.io/name=devworkspace-controller",
        service: "devworkspace-controller-manager-service",
    },
    webhook: Some(WorkloadProfile {
        deployment: "devworkspace-webhook-server",
        selector: "app.kubernetes.io/name=devworkspace-webhook-server",
        service: "devworkspace-webhookserver",
    }),
    global_config: Some("devworkspace-operator-config"),
};

/// Variants in detection order on OpenShift
pub const OPENSHIFT_VARIANTS: [&ProductVariant; 2] = [&ECLIPSE_CHE, &DEV_SPACES];

/// The only variant installable on plain Kubernetes
pub const KUBERNETES_VARIANT: &ProductVariant = &ECLIPSE_CHE;

/// Service fronting a managed deployment
///
/// The server deployment is named after the variant but its service is not.
pub fn service_for_deployment(deployment: &str) -> &str {
    if CANONICAL_SERVER_DEPLOYMENTS.contains(&deployment) {
        CANONICAL_SERVER_SERVICE
    } else {
        deployment
    }
}

/// Annotations, labels and fields of the DevWorkspace custom resource
pub mod devworkspace {
    pub const ID_PATH: &str = "$.status.devworkspaceId";
    pub const PHASE_PATH: &str = "$.status.phase";
    pub const ID_LABEL: &str = "controller.devfile.io/devworkspace_id";
    pub const MOUNTED_SELECTOR: &str = "controller.devfile.io/mount-to-devworkspace=true";
    pub const DEBUG_START_ANNOTATION: &str = "controller.devfile.io/debug-start";
    pub const TERMINAL_PHASES: [&str; 2] = ["Running", "Failing"];

    /// Selector for objects owned by one workspace
    pub fn id_selector(id: &str) -> String {
        format!("{ID_LABEL}={id}")
    }
}
