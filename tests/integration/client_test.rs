//! Integration tests for Kubernetes client construction
//!
//! These tests require a real Kubernetes cluster.
//! Run with: cargo test integration::client_test -- --ignored

use che_gather::client::create_client;
use che_gather::error::GatherError;

/// Test creating a client with the default context
#[tokio::test]
#[ignore]
async fn test_create_client_default_context() {
    let client = create_client(None).await;
    assert!(client.is_ok(), "Should create client with default context");
}

/// Test creating a client with a non-existent context
#[tokio::test]
#[ignore]
async fn test_create_client_nonexistent_context() {
    let client = create_client(Some("nonexistent-context-12345")).await;
    assert!(matches!(client, Err(GatherError::Config(_))));
}
