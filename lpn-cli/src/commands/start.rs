//! `lpn start` command.

use anyhow::Result;

use super::Variant;

pub async fn start(variant: Variant) -> Result<()> {
    let manager = super::manager().await?;
    manager.start(variant.into()).await?;
    Ok(())
}
