//! Error types for che-gather

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for che-gather
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Resource not found: {kind}/{name}")]
    NotFound { kind: String, name: String },

    #[error("Could not find {0} operator installation")]
    OperatorNotFound(String),

    #[error("Namespace not resolved for {0}")]
    NamespaceUnresolved(String),

    #[error("Directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid JSON query '{query}': {message}")]
    Query { query: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for GatherError {
    fn from(e: serde_json::Error) -> Self {
        GatherError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for GatherError {
    fn from(e: serde_yaml::Error) -> Self {
        GatherError::Serialization(e.to_string())
    }
}

/// Result type alias for che-gather
pub type Result<T> = std::result::Result<T, GatherError>;
