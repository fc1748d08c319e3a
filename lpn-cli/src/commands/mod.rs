use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use lpn_core::lifecycle::LifecycleManager;
use lpn_core::liferay::Portal;
use lpn_core::runtime::DockerRuntime;

pub mod deploy;
pub mod logs;
pub mod rm;
pub mod run;
pub mod start;
pub mod status;
pub mod stop;
pub mod tags;

/// Portal flavor, as selected on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Variant {
    Ce,
    Commerce,
    Dxp,
    Nightly,
    Release,
}

impl From<Variant> for Portal {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Ce => Portal::Ce,
            Variant::Commerce => Portal::Commerce,
            Variant::Dxp => Portal::Dxp,
            Variant::Nightly => Portal::Nightly,
            Variant::Release => Portal::Release,
        }
    }
}

/// Connects to the engine once for the whole invocation, failing fast when
/// Docker is unreachable.
pub(crate) async fn manager() -> Result<LifecycleManager> {
    let docker = lpn_core::client::connect()
        .context("Docker does not seem to be installed on this machine")?;
    lpn_core::client::ping(&docker)
        .await
        .context("Docker does not seem to be running")?;
    if let Some(version) = lpn_core::client::engine_version(&docker).await? {
        tracing::debug!(version, "Docker engine is reachable");
    }

    Ok(LifecycleManager::new(Arc::new(DockerRuntime::new(docker))))
}
