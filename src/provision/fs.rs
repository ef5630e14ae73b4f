//! File writing with explicit permission modes

use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::error::{ProvisionError, Result};

pub const OWNER_DIR_MODE: u32 = 0o700;
pub const OWNER_RW_MODE: u32 = 0o600;
pub const WORLD_READABLE_MODE: u32 = 0o644;

/// Create `path` and any missing parents. An existing directory is not an error.
pub async fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(path)
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))
}

/// Truncate-and-write `contents` with `mode` forced regardless of umask or prior mode.
pub async fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let mut file = open_restricted(path, mode).await?;
    file.write_all(contents)
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))?;
    file.flush()
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))?;
    drop(file);

    #[cfg(not(unix))]
    set_readonly_bit(path, mode).await?;

    Ok(())
}

/// Open `path` truncated. On unix the mode is applied to the handle before
/// any content is written, so an existing file with looser bits never holds new data.
async fn open_restricted(path: &Path, mode: u32) -> Result<tokio::fs::File> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    options.mode(mode);

    let file = options
        .open(path)
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(mode))
            .await
            .map_err(|e| ProvisionError::filesystem(path, e))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(file)
}

#[cfg(not(unix))]
async fn set_readonly_bit(path: &Path, mode: u32) -> Result<()> {
    // Only read-only vs read-write is expressible here
    let mut permissions = tokio::fs::metadata(path)
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))?
        .permissions();
    permissions.set_readonly(mode & 0o200 == 0);
    tokio::fs::set_permissions(path, permissions)
        .await
        .map_err(|e| ProvisionError::filesystem(path, e))
}
