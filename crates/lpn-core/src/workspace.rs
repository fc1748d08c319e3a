//! Per-user host workspace under `~/.lpn`.
//!
//! Database containers bind-mount a directory from here over their data
//! folder, so database content survives container recreation.

use std::path::PathBuf;

use tracing::debug;

use crate::{LpnError, Result};

/// Environment variable overriding the workspace root, mainly for tests.
pub const LPN_HOME_ENV: &str = "LPN_HOME";

/// Resolves the workspace root without creating it.
pub fn lpn_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(LPN_HOME_ENV) {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(".lpn"))
        .ok_or_else(|| LpnError::Workspace("could not resolve the user home directory".to_string()))
}

/// Resolves and creates the host data directory backing one database
/// container.
pub fn database_data_dir(container_name: &str) -> Result<PathBuf> {
    let path = lpn_home()?.join(container_name);
    std::fs::create_dir_all(&path)?;
    debug!(container = container_name, volume = %path.display(), "Mounting database data folder");
    Ok(path)
}
