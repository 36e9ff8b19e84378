//! [`ClusterApi`] backed by a live API server

use super::{ClusterApi, ResourceKind};
use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DynamicObject, ListParams, LogParams, Patch, PatchParams};
use kube::core::TypeMeta;
use kube::Client;
use serde_json::Value;
use tracing::debug;

/// Cluster access through a `kube::Client`
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, kind: ResourceKind, namespace: Option<&str>) -> Api<DynamicObject> {
        let ar = kind.api_resource();
        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &ar),
            None => Api::all_with(self.client.clone(), &ar),
        }
    }
}

/// List items come back without type information; restore it so exported
/// documents are self-describing.
fn to_value(kind: ResourceKind, mut obj: DynamicObject) -> Result<Value> {
    if obj.types.is_none() {
        obj.types = Some(TypeMeta {
            api_version: kind.api_version(),
            kind: kind.kind().to_string(),
        });
    }
    Ok(serde_json::to_value(obj)?)
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn has_api_group(&self, group: &str) -> Result<bool> {
        let groups = self.client.list_api_groups().await?;
        Ok(groups.groups.iter().any(|g| g.name == group))
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: Option<&str>,
        selector: Option<&str>,
    ) -> Result<Vec<Value>> {
        debug!(%kind, ?namespace, ?selector, "list");
        let mut lp = ListParams::default();
        if let Some(sel) = selector {
            lp = lp.labels(sel);
        }

        let list = self.api(kind, namespace).list(&lp).await?;
        list.items.into_iter().map(|obj| to_value(kind, obj)).collect()
    }

    async fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> Result<Option<Value>> {
        debug!(%kind, namespace, name, "get");
        match self.api(kind, Some(namespace)).get_opt(name).await? {
            Some(obj) => to_value(kind, obj).map(Some),
            None => Ok(None),
        }
    }

    async fn logs(&self, namespace: &str, pod: &str, container: &str) -> Result<String> {
        debug!(namespace, pod, container, "logs");
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let lp = LogParams {
            container: Some(container.to_string()),
            ..Default::default()
        };
        Ok(api.logs(pod, &lp).await?)
    }

    async fn patch_merge(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<()> {
        debug!(%kind, namespace, name, %patch, "merge patch");
        self.api(kind, Some(namespace))
            .patch(name, &PatchParams::default(), &Patch::Merge(patch))
            .await?;
        Ok(())
    }
}
