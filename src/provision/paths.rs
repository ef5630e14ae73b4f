//! Filesystem locations the external tool reads its trust configuration from

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FALLBACK_HOME: &str = "/root";
pub const DEFAULT_TOOL_CONFIG: &str = "/etc/ansible/ansible.cfg";

const SSH_CONFIG_FILE: &str = "config";
const PRIVATE_KEY_FILE: &str = "id_rsa";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingPaths {
    pub ssh_dir: PathBuf,
    pub tool_config: PathBuf,
}

impl StagingPaths {
    pub fn new(ssh_dir: impl Into<PathBuf>, tool_config: impl Into<PathBuf>) -> Self {
        Self {
            ssh_dir: ssh_dir.into(),
            tool_config: tool_config.into(),
        }
    }

    /// `<home>/.ssh` and the machine-wide ansible config
    pub fn system() -> Self {
        Self::new(resolve_home().join(".ssh"), DEFAULT_TOOL_CONFIG)
    }

    /// Everything under one directory, for isolated runs
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(root.join(".ssh"), root.join("ansible.cfg"))
    }

    pub fn ssh_config(&self) -> PathBuf {
        self.ssh_dir.join(SSH_CONFIG_FILE)
    }

    pub fn key_file(&self) -> PathBuf {
        self.ssh_dir.join(PRIVATE_KEY_FILE)
    }
}

/// Home directory of the current OS user, or `/root` when the user cannot be resolved.
pub fn resolve_home() -> PathBuf {
    match current_user_home() {
        Some(home) => home,
        None => {
            tracing::warn!(
                "Unable to resolve current user's home directory, falling back to {}",
                FALLBACK_HOME
            );
            PathBuf::from(FALLBACK_HOME)
        }
    }
}

#[cfg(unix)]
fn current_user_home() -> Option<PathBuf> {
    use nix::unistd::{getuid, User};

    match User::from_uid(getuid()) {
        Ok(Some(user)) => Some(user.dir),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("User lookup failed: {}", e);
            None
        }
    }
}

#[cfg(not(unix))]
fn current_user_home() -> Option<PathBuf> {
    dirs::home_dir()
}
