//! Integration tests module
//!
//! These tests require a real Kubernetes cluster and are marked with #[ignore].
//! Run them with: cargo test -- --ignored

mod client_test;
mod cluster_test;
