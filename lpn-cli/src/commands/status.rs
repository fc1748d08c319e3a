//! `lpn status` command.

use anyhow::Result;
use lpn_core::liferay::{Portal, PortalImage};

use super::Variant;

pub async fn status(variant: Variant) -> Result<()> {
    let manager = super::manager().await?;
    let portal: Portal = variant.into();
    let name = portal.container_name();

    if manager.exists(&name).await? {
        let image = manager.image_of(portal).await?;
        println!("The container [{name}] is running image [{image}]");

        if let Ok(port) = manager.http_port_of(&PortalImage::new(portal, None)).await {
            println!("The portal is reachable on http://localhost:{port}");
        }
    } else {
        println!("The container [{name}] is NOT running");
    }

    Ok(())
}
