//! Kubernetes client construction

use crate::error::{GatherError, Result};
use kube::{config::KubeConfigOptions, Client, Config};

/// Create a Kubernetes client for the specified context
///
/// Falls back to the in-cluster configuration when no kubeconfig is present
/// and no context was requested.
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = load_config(context).await?;
    Client::try_from(config).map_err(GatherError::from)
}

/// Load Kubernetes configuration
async fn load_config(context: Option<&str>) -> Result<Config> {
    if context.is_none() {
        return Config::infer()
            .await
            .map_err(|e| GatherError::Config(format!("Failed to load kubeconfig: {e}")));
    }

    let options = KubeConfigOptions {
        context: context.map(String::from),
        ..Default::default()
    };

    Config::from_kubeconfig(&options)
        .await
        .map_err(|e| GatherError::Config(format!("Failed to load kubeconfig: {e}")))
}
