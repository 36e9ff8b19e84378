// Common test utilities and helpers

use che_gather::profile::{ProductVariant, DEVWORKSPACE_OPERATOR};
use che_gather::topology::{NamespacedName, OperatorInstallation, Platform, Topology};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value};

/// Create a topology with both operators resolved
pub fn create_topology(
    platform: Platform,
    variant: &'static ProductVariant,
    checluster: Option<(&str, &str)>,
) -> Topology {
    let csv = |name: &str| platform.is_openshift().then(|| format!("{name}.v1.0.0"));
    Topology {
        platform,
        variant,
        devworkspace_operator: OperatorInstallation {
            profile: DEVWORKSPACE_OPERATOR,
            namespace: Some("devworkspace-controller".to_string()),
            csv_name: csv("devworkspace-operator"),
        },
        product_operator: OperatorInstallation {
            profile: variant.operator,
            namespace: Some(format!("{}-operator", variant.distribution_id)),
            csv_name: csv(variant.csv_marker),
        },
        checluster: checluster.map(|(name, namespace)| NamespacedName {
            name: name.to_string(),
            namespace: namespace.to_string(),
        }),
    }
}

/// Create an event that was last seen `minutes_ago`
pub fn create_mock_event(reason: &str, kind: &str, name: &str, minutes_ago: i64) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Event",
        "metadata": {"name": format!("{name}.17a"), "namespace": "default"},
        "type": "Warning",
        "reason": reason,
        "message": format!("{reason} for {name}"),
        "involvedObject": {"kind": kind, "name": name},
        "lastTimestamp": (Utc::now() - ChronoDuration::minutes(minutes_ago)).to_rfc3339(),
    })
}
