//! Tests for src/error/mod.rs - GatherError

use che_gather::error::GatherError;
use std::error::Error;
use std::path::PathBuf;

// ============================================================================
// GatherError Display tests
// ============================================================================

#[test]
fn test_operator_not_found_display() {
    let err = GatherError::OperatorNotFound("Eclipse Che".to_string());
    assert_eq!(err.to_string(), "Could not find Eclipse Che operator installation");
}

#[test]
fn test_directory_exists_display() {
    let err = GatherError::DirectoryExists(PathBuf::from("/tmp/che-debug"));
    assert_eq!(err.to_string(), "Directory already exists: /tmp/che-debug");
}

#[test]
fn test_not_found_display() {
    let err = GatherError::NotFound {
        kind: "Deployment".to_string(),
        name: "che".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("Resource not found"));
    assert!(display.contains("Deployment/che"));
}

#[test]
fn test_namespace_unresolved_display() {
    let err = GatherError::NamespaceUnresolved("operators/che-operator/events.yaml".to_string());
    assert!(err.to_string().contains("operators/che-operator/events.yaml"));
}

#[test]
fn test_query_error_display() {
    let err = GatherError::Query {
        query: "$..[".to_string(),
        message: "unexpected end".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("$..["));
    assert!(display.contains("unexpected end"));
}

#[test]
fn test_cancelled_display() {
    assert_eq!(GatherError::Cancelled.to_string(), "Operation cancelled");
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_io_error_conversion_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: GatherError = io.into();
    assert!(matches!(err, GatherError::Io(_)));
    assert!(err.source().is_some());
}

#[test]
fn test_serde_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: GatherError = json_err.into();
    assert!(matches!(err, GatherError::Serialization(_)));
}

#[test]
fn test_serde_yaml_error_conversion() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
    let err: GatherError = yaml_err.into();
    assert!(matches!(err, GatherError::Serialization(_)));
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GatherError>();
}
