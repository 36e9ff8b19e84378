//! Export plan construction
//!
//! Turns a detected [`Topology`] into the ordered list of [`ExportTask`]s
//! to run. Pure data; no cluster access happens here.

use crate::cluster::ResourceKind;
use crate::profile::{devworkspace, service_for_deployment, WorkloadProfile};
use crate::topology::{NamespacedName, OperatorInstallation, Platform, Topology};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which objects of a kind a task selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One object by name
    Named(String),
    /// Every object matching a label selector
    Selected(String),
    /// Every object in the namespace
    All,
}

/// How fetched objects are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Manifest or `v1/List` as YAML
    Yaml,
    /// A single field extracted with a JSONPath query, as text
    Field(&'static str),
    /// Events as a human-readable table
    EventsTable,
    /// Container logs of the selected pods, one file per container; the
    /// task output is a directory
    Logs,
}

/// One unit of export work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTask {
    /// Path relative to the destination directory
    pub output: PathBuf,
    pub kind: ResourceKind,
    pub target: Target,
    /// `None` when the owning namespace could not be resolved
    pub namespace: Option<String>,
    pub format: Format,
    /// Silently skipped when the named object does not exist
    pub optional: bool,
}

impl ExportTask {
    fn new(
        output: impl Into<PathBuf>,
        kind: ResourceKind,
        target: Target,
        namespace: Option<&str>,
        format: Format,
    ) -> Self {
        Self {
            output: output.into(),
            kind,
            target,
            namespace: namespace.map(String::from),
            format,
            optional: false,
        }
    }

    fn yaml(
        output: impl Into<PathBuf>,
        kind: ResourceKind,
        target: Target,
        ns: Option<&str>,
    ) -> Self {
        Self::new(output, kind, target, ns, Format::Yaml)
    }

    fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl fmt::Display for ExportTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Named(name) => write!(f, "{}/{}", self.kind, name)?,
            Target::Selected(selector) => write!(f, "{} ({selector})", self.kind)?,
            Target::All => write!(f, "{}", self.kind)?,
        }
        write!(f, " -> {}", self.output.display())
    }
}

/// The workspace selected with `--workspace-name/--workspace-namespace`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceExport {
    pub target: NamespacedName,
    /// `status.devworkspaceId`, `None` when the workspace could not be read
    pub devworkspace_id: Option<String>,
}

/// The full plan: both operators, the CheCluster if any, the workspace if asked
pub fn build_plan(topology: &Topology, workspace: Option<&WorkspaceExport>) -> Vec<ExportTask> {
    let mut tasks = operator_tasks(topology.platform, &topology.devworkspace_operator);
    tasks.extend(operator_tasks(topology.platform, &topology.product_operator));

    if let Some(checluster) = &topology.checluster {
        tasks.extend(checluster_tasks(
            topology.platform,
            topology.variant.managed_deployments,
            checluster,
        ));
    }

    if let Some(workspace) = workspace {
        tasks.extend(workspace_tasks(topology.platform, workspace));
    }

    tasks
}

/// Tasks for one operator under `operators/<id>/`
pub fn operator_tasks(platform: Platform, installation: &OperatorInstallation) -> Vec<ExportTask> {
    let profile = &installation.profile;
    let dir = PathBuf::from("operators").join(profile.id);
    let ns = installation.namespace.as_deref();
    let mut tasks = Vec::new();

    if platform.is_openshift() {
        if let Some(csv) = &installation.csv_name {
            let csv = Target::Named(csv.clone());
            tasks.push(ExportTask::new(
                dir.join("version.txt"),
                ResourceKind::ClusterServiceVersion,
                csv.clone(),
                ns,
                Format::Field("$.spec.version"),
            ));
            tasks.push(ExportTask::yaml(
                dir.join("csv.yaml"),
                ResourceKind::ClusterServiceVersion,
                csv,
                ns,
            ));
        }
    }

    tasks.extend(workload_tasks(&dir, "controller", &profile.controller, ns));
    if let Some(webhook) = &profile.webhook {
        tasks.extend(workload_tasks(&dir, "webhook-server", webhook, ns));
    }

    if let Some(config) = profile.global_config {
        tasks.push(
            ExportTask::yaml(
                dir.join("operator-config.yaml"),
                ResourceKind::DevWorkspaceOperatorConfig,
                Target::Named(config.to_string()),
                ns,
            )
            .optional(),
        );
    }

    tasks.extend(event_tasks(&dir, ns));
    tasks
}

fn workload_tasks(
    dir: &Path,
    prefix: &str,
    workload: &WorkloadProfile,
    ns: Option<&str>,
) -> Vec<ExportTask> {
    let selected = Target::Selected(workload.selector.to_string());
    vec![
        ExportTask::yaml(
            dir.join(format!("{prefix}.deployment.yaml")),
            ResourceKind::Deployment,
            Target::Named(workload.deployment.to_string()),
            ns,
        ),
        ExportTask::yaml(
            dir.join(format!("{prefix}.pods.yaml")),
            ResourceKind::Pod,
            selected.clone(),
            ns,
        ),
        ExportTask::yaml(
            dir.join(format!("{prefix}.service.yaml")),
            ResourceKind::Service,
            Target::Named(workload.service.to_string()),
            ns,
        ),
        ExportTask::new(dir, ResourceKind::Pod, selected, ns, Format::Logs),
    ]
}

fn event_tasks(dir: &Path, ns: Option<&str>) -> [ExportTask; 2] {
    [
        ExportTask::yaml(dir.join("events.yaml"), ResourceKind::Event, Target::All, ns),
        ExportTask::new(
            dir.join("events.txt"),
            ResourceKind::Event,
            Target::All,
            ns,
            Format::EventsTable,
        ),
    ]
}

/// How a platform exposes HTTP endpoints: kind, then singular and plural
/// file stems
fn exposure(platform: Platform) -> (ResourceKind, &'static str, &'static str) {
    match platform {
        Platform::OpenShift => (ResourceKind::Route, "route", "routes"),
        Platform::Kubernetes => (ResourceKind::Ingress, "ingress", "ingresses"),
    }
}

/// Tasks for the managed installation under `checluster/`
pub fn checluster_tasks(
    platform: Platform,
    managed_deployments: &[&str],
    checluster: &NamespacedName,
) -> Vec<ExportTask> {
    let dir = PathBuf::from("checluster");
    let ns = Some(checluster.namespace.as_str());
    let mut tasks = vec![ExportTask::yaml(
        dir.join(format!("{}.yaml", checluster.name)),
        ResourceKind::CheCluster,
        Target::Named(checluster.name.clone()),
        ns,
    )];

    for deployment in managed_deployments {
        let deploy_dir = dir.join(deployment);
        tasks.push(ExportTask::yaml(
            deploy_dir.join("deployment.yaml"),
            ResourceKind::Deployment,
            Target::Named(deployment.to_string()),
            ns,
        ));
        tasks.push(ExportTask::yaml(
            deploy_dir.join("service.yaml"),
            ResourceKind::Service,
            Target::Named(service_for_deployment(deployment).to_string()),
            ns,
        ));
        tasks.push(ExportTask::new(
            deploy_dir,
            ResourceKind::Deployment,
            Target::Named(deployment.to_string()),
            ns,
            Format::Logs,
        ));
    }

    let (kind, file, _) = exposure(platform);
    tasks.push(ExportTask::yaml(
        dir.join(format!("{file}.yaml")),
        kind,
        Target::All,
        ns,
    ));
    tasks.push(ExportTask::yaml(
        dir.join("devworkspaceoperatorconfig.yaml"),
        ResourceKind::DevWorkspaceOperatorConfig,
        Target::All,
        ns,
    ));
    tasks.extend(event_tasks(&dir, ns));
    tasks
}

/// Tasks for one DevWorkspace under `devworkspaces/`
///
/// Objects owned by the workspace are selected through its generated id,
/// so those tasks are left out when the id is unknown.
pub fn workspace_tasks(platform: Platform, workspace: &WorkspaceExport) -> Vec<ExportTask> {
    let dir = PathBuf::from("devworkspaces");
    let ns = Some(workspace.target.namespace.as_str());
    let mut tasks = vec![ExportTask::yaml(
        dir.join("devworkspace.yaml"),
        ResourceKind::DevWorkspace,
        Target::Named(workspace.target.name.clone()),
        ns,
    )];

    if let Some(id) = &workspace.devworkspace_id {
        let owned = Target::Selected(devworkspace::id_selector(id));
        let (exposure_kind, _, exposure_stem) = exposure(platform);
        let exposure_file = format!("{exposure_stem}.yaml");
        for (file, kind) in [
            ("services.yaml", ResourceKind::Service),
            ("deployments.yaml", ResourceKind::Deployment),
            ("pods.yaml", ResourceKind::Pod),
            (exposure_file.as_str(), exposure_kind),
            ("workspace-configmaps.yaml", ResourceKind::ConfigMap),
            ("serviceaccounts.yaml", ResourceKind::ServiceAccount),
        ] {
            tasks.push(ExportTask::yaml(dir.join(file), kind, owned.clone(), ns));
        }
        tasks.push(ExportTask::new(dir.clone(), ResourceKind::Pod, owned, ns, Format::Logs));
    }

    tasks.push(ExportTask::yaml(
        dir.join("mounted-configmaps.yaml"),
        ResourceKind::ConfigMap,
        Target::Selected(devworkspace::MOUNTED_SELECTOR.to_string()),
        ns,
    ));
    tasks.push(ExportTask::yaml(
        dir.join("pvcs.yaml"),
        ResourceKind::PersistentVolumeClaim,
        Target::All,
        ns,
    ));
    tasks.extend(event_tasks(&dir, ns));
    tasks
}
