//! Idempotent image presence.

use tracing::debug;

use crate::runtime::ContainerRuntime;
use crate::Result;

/// Makes sure an image is present locally. Already-present images (exact
/// reference match against the local tags) are left alone; anything else is
/// pulled from the registry, streaming and logging progress.
pub async fn ensure_image(runtime: &dyn ContainerRuntime, reference: &str) -> Result<()> {
    // The engine reports local tags without the default registry prefix.
    let local_reference = reference.trim_start_matches("docker.io/");

    let tags = runtime.image_tags(local_reference).await?;
    if tags.iter().any(|tag| tag == local_reference) {
        debug!(image = reference, "Image is already present locally");
        return Ok(());
    }

    runtime.pull(reference).await
}
