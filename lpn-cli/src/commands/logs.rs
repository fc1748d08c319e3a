//! `lpn logs` command.

use anyhow::Result;
use lpn_core::liferay::Portal;

use super::Variant;

pub async fn logs(variant: Variant) -> Result<()> {
    let manager = super::manager().await?;
    let portal: Portal = variant.into();

    manager
        .runtime()
        .tail_logs(&portal.container_name())
        .await?;
    Ok(())
}
