//! CLI definitions using clap

use crate::topology::NamespacedName;
use chrono::{DateTime, Local};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "che-gather",
    version,
    about = "Collect diagnostic data from an Eclipse Che or OpenShift Dev Spaces installation",
    long_about = None,
)]
pub struct Cli {
    /// Directory to write the collected data to; must not exist yet
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Also compress the collected data into a single archive
    #[arg(short = 'z', long)]
    pub zip: bool,

    /// DevWorkspace to collect (requires --workspace-namespace)
    #[arg(long, value_name = "NAME", requires = "workspace_namespace")]
    pub workspace_name: Option<String>,

    /// Namespace of the DevWorkspace (requires --workspace-name)
    #[arg(long, value_name = "NS", requires = "workspace_name")]
    pub workspace_namespace: Option<String>,

    /// Only look for the CheCluster in this namespace
    #[arg(long, value_name = "NS")]
    pub checluster_namespace: Option<String>,

    /// Start the DevWorkspace in debug mode before collecting
    #[arg(long, requires_all = ["workspace_name", "workspace_namespace"])]
    pub debug_workspace_start: bool,

    /// Kubernetes context to use
    #[arg(long, env = "CHE_GATHER_CONTEXT")]
    pub context: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The workspace pair, when given
    pub fn workspace(&self) -> Option<NamespacedName> {
        match (&self.workspace_name, &self.workspace_namespace) {
            (Some(name), Some(namespace)) => Some(NamespacedName {
                name: name.clone(),
                namespace: namespace.clone(),
            }),
            _ => None,
        }
    }

    /// `--dest-dir`, or a timestamped directory in the working directory
    pub fn destination(&self, now: DateTime<Local>) -> PathBuf {
        self.dest_dir
            .clone()
            .unwrap_or_else(|| default_dest_dir(now))
    }
}

/// `che-debug-<YYYY-mm-dd_HH-MM-SS>`
pub fn default_dest_dir(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("che-debug-{}", now.format("%Y-%m-%d_%H-%M-%S")))
}

/// Process exit code for a parse failure: help and version are not errors
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
