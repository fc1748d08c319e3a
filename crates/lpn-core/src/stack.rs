//! Linked stack orchestration: a portal container wired to its database.

use tracing::debug;

use crate::database::{DatabaseImage, LINK_ALIAS};
use crate::lifecycle::LifecycleManager;
use crate::liferay::{PortalImage, LPN_TYPE_LABEL};
use crate::pull::ensure_image;
use crate::runtime::{ContainerSpec, PortMapping};
use crate::Result;

/// Portal HTTP port inside the container.
pub const HTTP_PORT: u16 = 8080;

/// GoGo shell port inside the container.
pub const GOGO_SHELL_PORT: u16 = 11311;

/// JPDA debugger port inside the container.
pub const DEBUG_PORT: u16 = 9000;

// Portal configuration is injected through environment variables whose names
// encode punctuation with word tokens (`.` as `_PERIOD_`, an uppercase letter
// C as `_UPPERCASEC_`). The names below are the contract the portal images
// parse; they are not free to change.
const JDBC_DRIVER_VAR: &str =
    "LIFERAY_JDBC_PERIOD_DEFAULT_PERIOD_DRIVER_UPPERCASEC_LASS_UPPERCASEN_AME";
const JDBC_PASSWORD_VAR: &str = "LIFERAY_JDBC_PERIOD_DEFAULT_PERIOD_PASSWORD";
const JDBC_URL_VAR: &str = "LIFERAY_JDBC_PERIOD_DEFAULT_PERIOD_URL";
const JDBC_USERNAME_VAR: &str = "LIFERAY_JDBC_PERIOD_DEFAULT_PERIOD_USERNAME";
const JDBC_RETRY_DELAY_VAR: &str =
    "LIFERAY_RETRY_PERIOD_JDBC_PERIOD_ON_PERIOD_STARTUP_PERIOD_DELAY";
const JDBC_RETRY_MAX_VAR: &str =
    "LIFERAY_RETRY_PERIOD_JDBC_PERIOD_ON_PERIOD_STARTUP_PERIOD_MAX_PERIOD_RETRIES";

const JVM_OPTS_VAR: &str = "LIFERAY_JVM_OPTS";

/// Caller-provided options for one portal run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Host port bound to the portal HTTP port.
    pub http_port: u16,
    /// Host port bound to the GoGo shell port.
    pub gogo_shell_port: u16,
    /// Expose and bind the debugger port and enable JVM debug mode.
    pub debug: bool,
    /// Host port bound to the debugger port when `debug` is set.
    pub debug_port: u16,
    /// JVM options, e.g. `-Xmx1g`. Empty means none.
    pub memory: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            http_port: HTTP_PORT,
            gogo_shell_port: GOGO_SHELL_PORT,
            debug: false,
            debug_port: DEBUG_PORT,
            memory: None,
        }
    }
}

/// Runs a portal container, optionally linked to its database.
///
/// A pre-existing portal container of the same name is removed first: stale
/// state is never reused, and the options are applied from scratch. When a
/// database descriptor is supplied it is brought up before the portal
/// container is created, and the portal gets a network link to it plus the
/// JDBC connection parameters through its environment.
pub async fn run_portal(
    manager: &LifecycleManager,
    image: &PortalImage,
    database: Option<&DatabaseImage>,
    options: &RunOptions,
) -> Result<()> {
    let name = image.container_name();

    if manager.exists(&name).await? {
        debug!(container = %name, "The container already exists, removing it first");
        let _ = manager.remove(image.portal()).await;
    }

    let mut env = Vec::new();
    let mut exposed_ports = vec![HTTP_PORT, GOGO_SHELL_PORT];
    let mut port_bindings = vec![
        PortMapping {
            container_port: HTTP_PORT,
            host_port: options.http_port,
        },
        PortMapping {
            container_port: GOGO_SHELL_PORT,
            host_port: options.gogo_shell_port,
        },
    ];

    if options.debug {
        exposed_ports.push(DEBUG_PORT);
        port_bindings.push(PortMapping {
            container_port: DEBUG_PORT,
            host_port: options.debug_port,
        });
        env.push(format!("{}=true", image.portal().debug_env_var()));
    }

    if let Some(memory) = options.memory.as_deref().filter(|m| !m.is_empty()) {
        env.push(format!("{JVM_OPTS_VAR}={memory}"));
    }

    ensure_image(manager.runtime().as_ref(), &image.fully_qualified_name()).await?;

    let mut links = Vec::new();
    if let Some(database) = database {
        manager.ensure_database(database).await?;

        links.push(format!("{}:{LINK_ALIAS}", database.container_name()));

        let jdbc = database.jdbc_connection();
        env.push(format!("{JDBC_DRIVER_VAR}={}", jdbc.driver_class_name));
        env.push(format!("{JDBC_PASSWORD_VAR}={}", jdbc.password));
        env.push(format!("{JDBC_URL_VAR}={}", jdbc.url));
        env.push(format!("{JDBC_USERNAME_VAR}={}", jdbc.user));

        // The portal may come up before the database finished initializing.
        env.push(format!("{JDBC_RETRY_DELAY_VAR}=5"));
        env.push(format!("{JDBC_RETRY_MAX_VAR}=5"));
    }

    let spec = ContainerSpec {
        name: name.clone(),
        image: image.fully_qualified_name(),
        env,
        exposed_ports,
        port_bindings,
        binds: Vec::new(),
        labels: [(
            LPN_TYPE_LABEL.to_string(),
            image.portal().type_name().to_string(),
        )]
        .into(),
        links,
        user: None,
    };

    let runtime = manager.runtime();
    let id = runtime.create(&spec).await?;
    runtime.start(&id).await?;

    debug!(container = %name, image = %spec.image, "Container has been started");
    Ok(())
}
