//! Export task execution
//!
//! Runs each [`ExportTask`] against the cluster and writes the result under
//! the destination directory. A failing task is reported and skipped; it
//! never stops the run.

use crate::cluster::query::{name_of, select, select_str};
use crate::cluster::{ClusterApi, ResourceKind};
use crate::error::{GatherError, Result};
use crate::output::{self, format_events_table, format_yaml, list_document};
use crate::plan::{ExportTask, Format, Target};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create the destination directory, which must not exist yet
pub fn create_destination(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(GatherError::DirectoryExists(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Executes export tasks against one cluster into one directory
pub struct Exporter<'a, C: ClusterApi + ?Sized> {
    cluster: &'a C,
    root: PathBuf,
}

impl<'a, C: ClusterApi + ?Sized> Exporter<'a, C> {
    pub fn new(cluster: &'a C, root: impl Into<PathBuf>) -> Self {
        Self {
            cluster,
            root: root.into(),
        }
    }

    /// Run every task in order, warning about the ones that fail
    pub async fn run(&self, tasks: &[ExportTask]) {
        for task in tasks {
            debug!(%task, "export");
            if let Err(e) = self.run_task(task).await {
                output::warn(format!("Failed to export {task}: {e}"));
            }
        }
    }

    /// Run a single task
    pub async fn run_task(&self, task: &ExportTask) -> Result<()> {
        let namespace = task
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| GatherError::NamespaceUnresolved(task.output.display().to_string()))?;
        let path = self.root.join(&task.output);

        match task.format {
            Format::Yaml => {
                let Some(doc) = self.fetch(task, namespace).await? else {
                    return Ok(());
                };
                write_file(&path, &format_yaml(&doc)?)
            }
            Format::Field(query) => {
                let Some(doc) = self.fetch(task, namespace).await? else {
                    return Ok(());
                };
                let value = select_str(&doc, query).unwrap_or_default();
                write_file(&path, &format!("{value}\n"))
            }
            Format::EventsTable => {
                let events = self.list(task, namespace).await?;
                write_file(&path, &format_events_table(&events))
            }
            Format::Logs => self.export_logs(task, namespace, &path).await,
        }
    }

    /// Manifest for named targets, `v1/List` otherwise; `None` for a
    /// missing optional object
    async fn fetch(&self, task: &ExportTask, namespace: &str) -> Result<Option<Value>> {
        match &task.target {
            Target::Named(name) => match self.cluster.get(task.kind, namespace, name).await? {
                Some(obj) => Ok(Some(obj)),
                None if task.optional => {
                    debug!(%task, "optional object absent");
                    Ok(None)
                }
                None => Err(GatherError::NotFound {
                    kind: task.kind.to_string(),
                    name: name.clone(),
                }),
            },
            Target::Selected(_) | Target::All => {
                Ok(Some(list_document(self.list(task, namespace).await?)))
            }
        }
    }

    async fn list(&self, task: &ExportTask, namespace: &str) -> Result<Vec<Value>> {
        let selector = match &task.target {
            Target::Selected(selector) => Some(selector.as_str()),
            _ => None,
        };
        self.cluster.list(task.kind, Some(namespace), selector).await
    }

    async fn export_logs(&self, task: &ExportTask, namespace: &str, dir: &Path) -> Result<()> {
        let selector = match (&task.target, task.kind) {
            (Target::Named(deployment), ResourceKind::Deployment) => {
                let obj = self
                    .cluster
                    .get(ResourceKind::Deployment, namespace, deployment)
                    .await?
                    .ok_or_else(|| GatherError::NotFound {
                        kind: ResourceKind::Deployment.to_string(),
                        name: deployment.clone(),
                    })?;
                Some(deployment_selector(&obj).ok_or_else(|| {
                    GatherError::InvalidArgument(format!(
                        "deployment {deployment} has no matchLabels selector"
                    ))
                })?)
            }
            (Target::Selected(selector), _) => Some(selector.clone()),
            (Target::All, _) => None,
            (Target::Named(name), kind) => {
                return Err(GatherError::InvalidArgument(format!(
                    "cannot collect logs for {kind}/{name}"
                )))
            }
        };

        let pods = self
            .cluster
            .list(ResourceKind::Pod, Some(namespace), selector.as_deref())
            .await?;
        fs::create_dir_all(dir)?;

        for pod in &pods {
            let Some(pod_name) = name_of(pod) else {
                continue;
            };
            for container in container_names(pod) {
                let file = dir.join(format!("{pod_name}-{container}.log"));
                match self.cluster.logs(namespace, &pod_name, &container).await {
                    Ok(text) => write_file(&file, &text)?,
                    Err(e) => output::warn(format!(
                        "Failed to get logs of {namespace}/{pod_name} container {container}: {e}"
                    )),
                }
            }
        }
        Ok(())
    }
}

/// Init containers first, then regular containers
pub fn container_names(pod: &Value) -> Vec<String> {
    ["$.spec.initContainers[*].name", "$.spec.containers[*].name"]
        .into_iter()
        .flat_map(|query| select(pod, query).unwrap_or_default())
        .filter_map(|v| v.as_str().map(String::from))
        .collect()
}

/// Label selector string built from a deployment's `spec.selector.matchLabels`
pub fn deployment_selector(deployment: &Value) -> Option<String> {
    let labels = deployment.pointer("/spec/selector/matchLabels")?.as_object()?;
    if labels.is_empty() {
        return None;
    }
    Some(
        labels
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| format!("{k}={v}")))
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
