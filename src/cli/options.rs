use clap::Parser;
use std::path::PathBuf;

use crate::command::DEFAULT_ANSIBLE_BIN;
use crate::provision::paths::DEFAULT_TOOL_CONFIG;
use crate::provision::StagingPaths;
use crate::types::{BuildInfo, ProvisionConfig, DEFAULT_INVENTORY_PATH, DEFAULT_PLAYBOOK};

/// Runs ansible-playbook against each inventory of a CI checkout
#[derive(Parser, Debug, Clone)]
#[command(name = "ansible-provision")]
#[command(about = "Provision infrastructure with ansible-playbook from a CI pipeline step")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ProvisionCli {
    /// Source checkout the inventory and playbook paths are relative to
    #[arg(long, env = "DRONE_WORKSPACE", default_value = ".")]
    pub workspace: String,

    /// Commit being built, passed to ansible as `commit_sha`
    #[arg(long, env = "DRONE_COMMIT_SHA", default_value = "")]
    pub commit_sha: String,

    /// Tag being built, passed as `commit_tag` when non-empty
    #[arg(long, env = "DRONE_TAG", default_value = "")]
    pub tag: String,

    /// Inventory directory, relative to the workspace
    #[arg(long, env = "PLUGIN_INVENTORY_PATH", default_value = DEFAULT_INVENTORY_PATH)]
    pub inventory_path: String,

    /// Inventories to provision, in order
    #[arg(long, env = "PLUGIN_INVENTORIES", value_delimiter = ',')]
    pub inventories: Vec<String>,

    /// Playbook, relative to the workspace
    #[arg(long, env = "PLUGIN_PLAYBOOK", default_value = DEFAULT_PLAYBOOK)]
    pub playbook: String,

    /// PEM encoded private key used to reach the hosts
    #[arg(long, env = "PLUGIN_SSH_KEY", default_value = "", hide_env_values = true)]
    pub ssh_key: String,

    /// ansible-playbook executable
    #[arg(long, env = "PLUGIN_ANSIBLE_BIN", default_value = DEFAULT_ANSIBLE_BIN)]
    pub ansible_bin: String,

    /// Directory for the SSH key and client config [default: <home>/.ssh]
    #[arg(long, env = "PLUGIN_SSH_DIR")]
    pub ssh_dir: Option<PathBuf>,

    /// Global ansible configuration file
    #[arg(long, env = "PLUGIN_ANSIBLE_CONFIG", default_value = DEFAULT_TOOL_CONFIG)]
    pub ansible_config: PathBuf,

    /// Print the planned commands without staging files or running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl ProvisionCli {
    pub fn build_info(&self) -> BuildInfo {
        BuildInfo::new(&self.workspace, &self.commit_sha, &self.tag)
    }

    pub fn provision_config(&self) -> ProvisionConfig {
        ProvisionConfig {
            inventory_path: self.inventory_path.clone(),
            inventories: self
                .inventories
                .iter()
                .map(|inventory| inventory.trim().to_string())
                .filter(|inventory| !inventory.is_empty())
                .collect(),
            playbook_path: self.playbook.clone(),
            ssh_private_key: self.ssh_key.clone(),
        }
    }

    /// Resolves the home directory only when `--ssh-dir` is not given.
    pub fn staging_paths(&self) -> StagingPaths {
        match &self.ssh_dir {
            Some(ssh_dir) => StagingPaths::new(ssh_dir, &self.ansible_config),
            None => StagingPaths {
                tool_config: self.ansible_config.clone(),
                ..StagingPaths::system()
            },
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbosity {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
