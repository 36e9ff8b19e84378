//! Debug start of a DevWorkspace
//!
//! Marks the workspace with the debug-start annotation and starts it, so the
//! controller keeps failed workspaces around long enough to collect their
//! logs. The annotation is owned by a [`DebugStartGuard`]; releasing the
//! guard removes it again.

use crate::cluster::query::select_str;
use crate::cluster::{ClusterApi, ResourceKind};
use crate::error::Result;
use crate::output;
use crate::profile::devworkspace::{DEBUG_START_ANNOTATION, PHASE_PATH, TERMINAL_PHASES};
use crate::topology::NamespacedName;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// How long to wait for a started workspace to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPolicy {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for StartPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            attempts: 60,
        }
    }
}

/// Result of waiting for the workspace phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A terminal phase was observed on the given attempt
    Settled { phase: String, attempt: u32 },
    /// No terminal phase within the policy's attempts
    TimedOut { attempts: u32 },
}

/// Holds the debug-start annotation on a workspace until released
#[must_use = "the debug-start annotation stays on the workspace until released"]
pub struct DebugStartGuard<'a, C: ClusterApi + ?Sized> {
    cluster: &'a C,
    target: NamespacedName,
    released: bool,
}

/// Annotate the workspace for debugging and request it to start
///
/// Failure here is fatal for the run; on success the returned guard owns
/// the cleanup.
pub async fn begin<'a, C: ClusterApi + ?Sized>(
    cluster: &'a C,
    target: &NamespacedName,
) -> Result<DebugStartGuard<'a, C>> {
    let patch = json!({
        "metadata": {"annotations": {DEBUG_START_ANNOTATION: "true"}},
        "spec": {"started": true},
    });
    cluster
        .patch_merge(ResourceKind::DevWorkspace, &target.namespace, &target.name, &patch)
        .await?;
    output::info(format!("Started DevWorkspace {target} in debug mode"));

    Ok(DebugStartGuard {
        cluster,
        target: target.clone(),
        released: false,
    })
}

impl<'a, C: ClusterApi + ?Sized> DebugStartGuard<'a, C> {
    /// Poll the workspace phase until it is running or failing
    ///
    /// Read errors count as a non-terminal attempt. Timing out is only a
    /// warning; collection continues with whatever state exists.
    pub async fn wait_for_phase(&self, policy: &StartPolicy) -> StartOutcome {
        for attempt in 1..=policy.attempts {
            match self
                .cluster
                .get(ResourceKind::DevWorkspace, &self.target.namespace, &self.target.name)
                .await
            {
                Ok(Some(obj)) => {
                    let phase = select_str(&obj, PHASE_PATH);
                    debug!(attempt, ?phase, "workspace phase");
                    if let Some(phase) = phase.filter(|p| TERMINAL_PHASES.contains(&p.as_str())) {
                        output::info(format!("DevWorkspace {} is {phase}", self.target));
                        return StartOutcome::Settled { phase, attempt };
                    }
                }
                Ok(None) => debug!(attempt, "workspace not found"),
                Err(e) => debug!(attempt, "failed to read workspace: {e}"),
            }

            if attempt < policy.attempts {
                tokio::time::sleep(policy.interval).await;
            }
        }

        output::warn(format!(
            "Timed out waiting for DevWorkspace {} to start, collecting current state",
            self.target
        ));
        StartOutcome::TimedOut {
            attempts: policy.attempts,
        }
    }

    /// Remove the debug-start annotation
    ///
    /// Consumes the guard so the removal happens at most once. A failing
    /// removal is reported, never fatal.
    pub async fn release(mut self) {
        self.released = true;
        let patch = json!({"metadata": {"annotations": {DEBUG_START_ANNOTATION: null}}});
        match self
            .cluster
            .patch_merge(
                ResourceKind::DevWorkspace,
                &self.target.namespace,
                &self.target.name,
                &patch,
            )
            .await
        {
            Ok(()) => output::info(format!(
                "Removed debug-start annotation from DevWorkspace {}",
                self.target
            )),
            Err(e) => output::warn(format!(
                "Failed to remove debug-start annotation from DevWorkspace {}: {e}",
                self.target
            )),
        }
    }
}

impl<C: ClusterApi + ?Sized> Drop for DebugStartGuard<'_, C> {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                workspace = %self.target,
                "debug-start annotation was not removed, remove {DEBUG_START_ANNOTATION} by hand"
            );
        }
    }
}
