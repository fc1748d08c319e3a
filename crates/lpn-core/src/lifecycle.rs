//! Container lifecycle management.
//!
//! Containers move through `Absent → Created → Running → Stopped → Absent`.
//! Everything past creation is resolved through the `lpn-type` ownership
//! label; names only decide idempotency guards and start ordering.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::database::DatabaseImage;
use crate::liferay::{Portal, PortalImage, LPN_TYPE_LABEL};
use crate::pull::ensure_image;
use crate::runtime::{BindMount, ContainerRuntime, ContainerSpec};
use crate::workspace;
use crate::{LpnError, Result};

/// Label key identifying the database backend of a stack.
pub const DB_TYPE_LABEL: &str = "db-type";

/// Drives create / start / stop / remove against the engine, enforcing
/// idempotency and ordering.
pub struct LifecycleManager {
    runtime: Arc<dyn ContainerRuntime>,
}

impl LifecycleManager {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &Arc<dyn ContainerRuntime> {
        &self.runtime
    }

    /// True iff a container with that exact name exists, in any state.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let containers = self.runtime.list_all().await?;
        Ok(containers.iter().any(|container| container.name == name))
    }

    /// Makes sure the database container for a stack is up. Idempotent: an
    /// existing container of that name is left untouched, whatever its
    /// configuration.
    pub async fn ensure_database(&self, database: &DatabaseImage) -> Result<()> {
        let name = database.container_name();

        if self.exists(&name).await? {
            debug!(
                container = %name,
                "Not starting a new container because it's already running"
            );
            return Ok(());
        }

        let data_dir = workspace::database_data_dir(&name)?;

        ensure_image(self.runtime.as_ref(), &database.fully_qualified_name()).await?;

        let spec = ContainerSpec {
            name: name.clone(),
            image: database.fully_qualified_name(),
            env: database.env_variables(),
            exposed_ports: vec![database.port()],
            port_bindings: Vec::new(),
            binds: vec![BindMount {
                source: data_dir,
                target: database.data_folder().to_string(),
            }],
            labels: [
                (DB_TYPE_LABEL.to_string(), database.type_name().to_string()),
                (LPN_TYPE_LABEL.to_string(), database.lpn_type().to_string()),
            ]
            .into(),
            links: Vec::new(),
            user: None,
        };

        let id = self.runtime.create(&spec).await?;
        self.runtime.start(&id).await?;

        debug!(container = %name, image = %spec.image, "Database container has been started");
        Ok(())
    }

    /// Stops every container labeled with the variant. Best-effort across
    /// matches: individual failures are logged and the last one is returned.
    pub async fn stop(&self, portal: Portal) -> Result<()> {
        let containers = self.resolve(portal).await?;

        let mut last_error = None;
        for container in &containers {
            match self.runtime.stop(&container.name).await {
                Ok(()) => info!(container = %container.name, "Container has been stopped"),
                Err(error) => {
                    error!(container = %container.name, %error, "Could not stop container");
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Starts every container labeled with the variant, leaving the portal
    /// container itself for last: its network link requires the database to
    /// already be running when it comes up.
    pub async fn start(&self, portal: Portal) -> Result<()> {
        let containers = self.resolve(portal).await?;
        let canonical = portal.container_name();

        let mut last_error = None;
        for container in &containers {
            if container.name == canonical {
                continue;
            }

            match self.runtime.start(&container.name).await {
                Ok(()) => info!(container = %container.name, "Database container has been started"),
                Err(error) => {
                    error!(container = %container.name, %error, "Could not start container");
                    last_error = Some(error);
                }
            }
        }

        match self.runtime.start(&canonical).await {
            Ok(()) => info!(container = %canonical, "Container has been started"),
            Err(error) => {
                error!(container = %canonical, %error, "Could not start container");
                last_error = Some(error);
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Removes every container labeled with the variant, forced and with
    /// volume cleanup. Best-effort across matches, like [`Self::stop`].
    pub async fn remove(&self, portal: Portal) -> Result<()> {
        let containers = self.resolve(portal).await?;

        let mut last_error = None;
        for container in &containers {
            match self.runtime.remove(&container.name).await {
                Ok(()) => info!(container = %container.name, "Container has been removed"),
                Err(error) => {
                    error!(container = %container.name, %error, "Could not remove container");
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Image reference the canonical container for the variant was created
    /// from.
    pub async fn image_of(&self, portal: Portal) -> Result<String> {
        let canonical = portal.container_name();
        let containers = self.runtime.list_all().await?;

        containers
            .into_iter()
            .find(|container| container.name == canonical)
            .map(|container| container.image)
            .ok_or(LpnError::ContainerNotFound(canonical))
    }

    /// Host port bound to the portal's HTTP port (8080/tcp).
    pub async fn http_port_of(&self, image: &PortalImage) -> Result<String> {
        let name = image.container_name();
        let details = self.runtime.inspect(&name).await?;

        details
            .host_ports
            .get(&8080)
            .cloned()
            .ok_or(LpnError::ContainerNotFound(name))
    }

    /// Resolves the containers belonging to a variant through the ownership
    /// label. Zero matches is a Not-Found error naming the canonical
    /// container, and performs no mutation.
    async fn resolve(&self, portal: Portal) -> Result<Vec<crate::runtime::ContainerInstance>> {
        let containers = self
            .runtime
            .list_by_label(LPN_TYPE_LABEL, portal.type_name())
            .await?;

        if containers.is_empty() {
            let canonical = portal.container_name();
            error!(
                container = %canonical,
                label = format!("{LPN_TYPE_LABEL}={}", portal.type_name()),
                "No containers found for the label"
            );
            return Err(LpnError::ContainerNotFound(canonical));
        }

        Ok(containers)
    }
}
