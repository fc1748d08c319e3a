//! Container lifecycle orchestration for disposable Liferay Portal stacks.
//!
//! `lpn-core` provisions, links and tears down short-lived container stacks
//! (a portal container plus an optional database container) against a local
//! Docker engine. Containers are owned through labels (`lpn-type`,
//! `db-type`), never through names: the label is the only discovery key once
//! a stack exists.
//!
//! The crate is organized around a small set of components:
//!
//! - [`liferay`] / [`database`]: immutable image descriptors, one closed
//!   variant set per capability.
//! - [`client`]: the engine connection facade.
//! - [`runtime`]: the [`runtime::ContainerRuntime`] port and its bollard
//!   implementation.
//! - [`lifecycle`]: create / start / stop / remove with idempotency guards
//!   and label-based discovery.
//! - [`stack`]: composes a portal container with its linked database.
//! - [`pull`] / [`deploy`] / [`workspace`]: image presence, file deployment
//!   into running containers, and the per-user host workspace.

use thiserror::Error;

// Re-export bollard so consumers share a single engine API version.
pub use bollard;

pub mod client;
pub mod database;
pub mod deploy;
pub mod lifecycle;
pub mod liferay;
pub mod pull;
pub mod runtime;
pub mod stack;
pub mod workspace;

/// Errors raised by the orchestration layer.
#[derive(Error, Debug)]
pub enum LpnError {
    /// The Docker client could not be constructed from the host environment.
    /// Nothing is meaningful without it, so callers abort on this.
    #[error("could not connect to the Docker engine: {0}")]
    Connect(#[source] bollard::errors::Error),

    /// No container carries the expected ownership label. The payload is the
    /// canonical container name for the variant that was looked up.
    #[error("no such container: {0}")]
    ContainerNotFound(String),

    /// The pull could not be initiated for an image.
    #[error("could not pull image {image}: {source}")]
    Pull {
        image: String,
        #[source]
        source: bollard::errors::Error,
    },

    /// A file could not be deployed into a running container.
    #[error("could not deploy file: {0}")]
    Deploy(String),

    /// The per-user workspace directory could not be resolved or created.
    #[error("workspace error: {0}")]
    Workspace(String),

    /// Catch-all for other Docker API failures.
    #[error("Docker API error: {0}")]
    Engine(#[from] bollard::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for all orchestration operations.
pub type Result<T> = std::result::Result<T, LpnError>;
