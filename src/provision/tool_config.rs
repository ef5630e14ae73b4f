use std::path::Path;
use tracing::{info, warn};

use super::error::Result;
use super::fs::{write_with_mode, OWNER_RW_MODE};

/// Disables host key checking for every ansible run on this machine.
pub const ANSIBLE_CONFIG: &str = "[defaults]\nhost_key_checking = False\n";

/// Write the global ansible configuration. The parent directory must already exist.
pub async fn write_global_tool_config(path: &Path) -> Result<()> {
    warn!(
        "Disabling ansible host key checking via {}; remote hosts are not authenticated",
        path.display()
    );
    write_with_mode(path, ANSIBLE_CONFIG.as_bytes(), OWNER_RW_MODE).await?;
    info!("Wrote ansible configuration to {}", path.display());
    Ok(())
}
