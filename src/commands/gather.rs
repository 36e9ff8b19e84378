//! Gather command implementation

use crate::archive::{archive_path, create_archive};
use crate::cli::Cli;
use crate::client::create_client;
use crate::cluster::query::select_str;
use crate::cluster::{ClusterApi, KubeCluster, ResourceKind};
use crate::config::AppConfig;
use crate::debug_start::{self, DebugStartGuard, StartPolicy};
use crate::error::{GatherError, Result};
use crate::export::{create_destination, Exporter};
use crate::output;
use crate::plan::{build_plan, WorkspaceExport};
use crate::profile::devworkspace;
use crate::topology::{self, NamespacedName, Topology};
use chrono::Local;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run a full collection against the configured cluster
pub async fn run_gather(cli: &Cli, config: &AppConfig) -> Result<()> {
    let dest = cli.destination(Local::now());
    let client = create_client(cli.context.as_deref()).await?;
    let cluster = KubeCluster::new(client);
    gather(&cluster, cli, config, &dest, shutdown_signal()).await
}

/// Collect everything into `dest`
///
/// `shutdown` resolving aborts the collection; a debug-start annotation is
/// removed either way.
pub async fn gather<C, S>(
    cluster: &C,
    cli: &Cli,
    config: &AppConfig,
    dest: &Path,
    shutdown: S,
) -> Result<()>
where
    C: ClusterApi + ?Sized,
    S: Future<Output = ()>,
{
    let policy = StartPolicy {
        interval: config.poll_interval()?,
        attempts: config.start_poll_attempts,
    };

    create_destination(dest)?;
    output::info(format!("Collecting data into {}", dest.display()));

    let topology = topology::detect(
        cluster,
        &config.catalog_namespace,
        cli.checluster_namespace.as_deref(),
    )
    .await?;

    let workspace = cli.workspace();
    let guard = match &workspace {
        Some(target) if cli.debug_workspace_start => {
            Some(debug_start::begin(cluster, target).await?)
        }
        _ => None,
    };

    // One signal listener for the whole run; a signal arriving while the
    // annotation is being removed still cancels the archive step.
    tokio::pin!(shutdown);

    let collection = collect(
        cluster,
        &topology,
        workspace.as_ref(),
        guard.as_ref(),
        &policy,
        dest,
    );
    let collected = tokio::select! {
        biased;
        _ = &mut shutdown => Err(GatherError::Cancelled),
        _ = collection => Ok(()),
    };

    if let Some(guard) = guard {
        guard.release().await;
    }
    collected?;

    if cli.zip {
        let archive = tokio::select! {
            biased;
            _ = &mut shutdown => {
                discard_archive(dest, topology.variant.distribution_id);
                return Err(GatherError::Cancelled);
            }
            archive = write_archive(dest, topology.variant.distribution_id) => archive?,
        };
        output::info(format!("Archive written to {}", archive.display()));
    }
    output::info(format!("Collection finished: {}", dest.display()));
    Ok(())
}

async fn collect<C: ClusterApi + ?Sized>(
    cluster: &C,
    topology: &Topology,
    workspace: Option<&NamespacedName>,
    guard: Option<&DebugStartGuard<'_, C>>,
    policy: &StartPolicy,
    dest: &Path,
) {
    if let Some(guard) = guard {
        guard.wait_for_phase(policy).await;
    }

    let workspace = match workspace {
        Some(target) => Some(resolve_workspace(cluster, target).await),
        None => None,
    };

    let tasks = build_plan(topology, workspace.as_ref());
    Exporter::new(cluster, dest).run(&tasks).await;
}

/// Compress on the blocking pool so the runtime keeps watching for signals
async fn write_archive(dest: &Path, distribution_id: &'static str) -> Result<PathBuf> {
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || create_archive(&dest, distribution_id))
        .await
        .map_err(|e| GatherError::Archive(format!("archive task failed: {e}")))?
}

/// Remove a partially written archive after an interrupt
fn discard_archive(dest: &Path, distribution_id: &str) {
    if let Ok(path) = archive_path(dest, distribution_id) {
        if path.exists() && fs::remove_file(&path).is_err() {
            output::warn(format!("Could not remove partial archive {}", path.display()));
        }
    }
}

/// Read the generated id of the requested workspace, best effort
async fn resolve_workspace<C: ClusterApi + ?Sized>(
    cluster: &C,
    target: &NamespacedName,
) -> WorkspaceExport {
    let devworkspace_id = match cluster
        .get(ResourceKind::DevWorkspace, &target.namespace, &target.name)
        .await
    {
        Ok(Some(ws)) => {
            let id = select_str(&ws, devworkspace::ID_PATH);
            if id.is_none() {
                output::warn(format!("DevWorkspace {target} has no devworkspaceId yet"));
            }
            id
        }
        Ok(None) => {
            output::warn(format!("DevWorkspace {target} not found"));
            None
        }
        Err(e) => {
            output::warn(format!("Failed to read DevWorkspace {target}: {e}"));
            None
        }
    };

    WorkspaceExport {
        target: target.clone(),
        devworkspace_id,
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
