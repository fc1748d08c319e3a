//! `lpn deploy` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lpn_core::liferay::PortalImage;

use super::Variant;

#[derive(Args)]
pub struct DeployArgs {
    /// Portal flavor the file is deployed to
    pub variant: Variant,

    /// File to copy into the portal's auto-deploy folder
    pub file: PathBuf,

    /// Image tag; the flavor's default when omitted
    #[arg(short, long)]
    pub tag: Option<String>,
}

pub async fn deploy(args: DeployArgs) -> Result<()> {
    let manager = super::manager().await?;
    let image = PortalImage::new(args.variant.into(), args.tag.clone());

    lpn_core::deploy::deploy_file(manager.runtime().as_ref(), &image, &args.file).await?;

    println!(
        "Deployed [{}] to [{}]",
        args.file.display(),
        image.portal().deploy_folder()
    );
    Ok(())
}
