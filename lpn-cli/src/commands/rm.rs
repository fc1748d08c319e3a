//! `lpn rm` command.

use anyhow::Result;
use lpn_core::liferay::Portal;
use tracing::warn;

use super::Variant;

pub async fn rm(variant: Variant) -> Result<()> {
    let manager = super::manager().await?;
    let portal: Portal = variant.into();

    // A missing stack is not worth failing the invocation over.
    if let Err(error) = manager.remove(portal).await {
        warn!(container = %portal.container_name(), %error, "Impossible to remove the container");
    }

    Ok(())
}
