//! Stages the SSH private key and client configuration for non-interactive runs

use tracing::{debug, info};

use super::error::{ProvisionError, Result};
use super::fs::{ensure_dir, write_with_mode, OWNER_DIR_MODE, OWNER_RW_MODE, WORLD_READABLE_MODE};
use super::paths::StagingPaths;

pub const SSH_CLIENT_CONFIG: &str = "StrictHostKeyChecking no\n";

/// Write the SSH client config and private key under `paths.ssh_dir`.
///
/// An empty key fails with [`ProvisionError::MissingCredential`] before anything
/// touches the filesystem. Both file writes are fatal on error.
pub async fn provision_credentials(ssh_private_key: &str, paths: &StagingPaths) -> Result<()> {
    if ssh_private_key.is_empty() {
        return Err(ProvisionError::MissingCredential);
    }

    debug!("Ensuring SSH directory {}", paths.ssh_dir.display());
    ensure_dir(&paths.ssh_dir, OWNER_DIR_MODE).await?;

    let config_path = paths.ssh_config();
    write_with_mode(&config_path, SSH_CLIENT_CONFIG.as_bytes(), WORLD_READABLE_MODE).await?;
    debug!("Wrote SSH client config to {}", config_path.display());

    let key_path = paths.key_file();
    write_with_mode(&key_path, ssh_private_key.as_bytes(), OWNER_RW_MODE).await?;
    info!("Staged SSH private key at {}", key_path.display());

    Ok(())
}
