//! `lpn stop` command.

use anyhow::Result;

use super::Variant;

pub async fn stop(variant: Variant) -> Result<()> {
    let manager = super::manager().await?;
    manager.stop(variant.into()).await?;
    Ok(())
}
