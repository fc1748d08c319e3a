//! File deployment into a running portal container.

use std::path::Path;

use tracing::debug;

use crate::liferay::PortalImage;
use crate::runtime::ContainerRuntime;
use crate::{LpnError, Result};

/// Copies a file into the portal's auto-deploy folder and hands ownership to
/// the portal's OS user.
///
/// The engine only accepts directory uploads as tar archives, so the file is
/// wrapped into a single-entry archive first.
pub async fn deploy_file(
    runtime: &dyn ContainerRuntime,
    image: &PortalImage,
    path: &Path,
) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LpnError::Deploy(format!("not a deployable file: {}", path.display())))?
        .to_string();

    let container = image.container_name();
    let deploy_folder = image.portal().deploy_folder();

    debug!(file = %path.display(), target = deploy_folder, "Deploying file to the container");

    let contents = tokio::fs::read(path).await?;
    let archive = build_archive(&file_name, &contents)?;

    runtime
        .copy_archive(&container, deploy_folder, archive)
        .await?;

    // The archive lands owned by root; the portal process watches the folder
    // as its own user.
    let owner = image.portal().user();
    let target = format!("{deploy_folder}/{file_name}");
    runtime
        .exec_detached(
            &container,
            "root",
            vec![
                "chown".to_string(),
                format!("{owner}:{owner}"),
                target,
            ],
        )
        .await
}

fn build_archive(file_name: &str, contents: &[u8]) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());

    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o777);
    header.set_cksum();

    builder.append_data(&mut header, file_name, contents)?;
    Ok(builder.into_inner()?)
}
