//! Docker engine connection facade.
//!
//! The client is constructed exactly once during setup and injected into the
//! components that need it, so a single live connection is reused across the
//! whole orchestration session.

use bollard::Docker;
use tracing::debug;

use crate::{LpnError, Result};

/// Connects to the Docker engine from host environment configuration
/// (`DOCKER_HOST` and friends, falling back to the platform default socket).
///
/// Failure here is fatal to the invocation: no operation is meaningful
/// without the engine.
pub fn connect() -> Result<Docker> {
    let docker = Docker::connect_with_defaults().map_err(LpnError::Connect)?;
    debug!("Connected to the Docker engine");
    Ok(docker)
}

/// Probes the engine for reachability. Used to fail fast with a clear error
/// before any lifecycle operation is attempted.
pub async fn ping(docker: &Docker) -> Result<()> {
    docker.ping().await?;
    Ok(())
}

/// Returns the engine version string, when the engine reports one.
pub async fn engine_version(docker: &Docker) -> Result<Option<String>> {
    let version = docker.version().await?;
    Ok(version.version)
}
