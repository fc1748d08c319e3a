//! The container runtime port and its Docker implementation.
//!
//! [`ContainerRuntime`] abstracts the exact engine capability set the
//! orchestration layer needs: list/inspect/create/start/stop/remove,
//! streaming image pulls, detached command execution, archive upload and log
//! following. [`DockerRuntime`] implements it with bollard; tests implement
//! it in memory.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, LogsOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions, UploadToContainerOptions,
};
use bollard::exec::{CreateExecOptions, StartExecOptions};
use bollard::image::CreateImageOptions;
use bollard::models::{CreateImageInfo, HostConfig, Mount, MountTypeEnum, PortBinding};
use bollard::Docker;
use futures::{Stream, StreamExt};
use tracing::{info, warn};

use crate::{LpnError, Result};

/// A container as reported by the engine. Read-only: the orchestration layer
/// never persists its own copy and re-reads on every query.
#[derive(Debug, Clone, Default)]
pub struct ContainerInstance {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: String,
    pub labels: HashMap<String, String>,
}

/// Subset of a container inspection relevant to this tool.
#[derive(Debug, Clone, Default)]
pub struct ContainerDetails {
    pub image: String,
    /// Host ports bound per container port.
    pub host_ports: HashMap<u16, String>,
}

/// One container-port to host-port binding, always on all interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
}

/// A host directory bind-mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    pub source: PathBuf,
    pub target: String,
}

/// The runtime container specification: derived fresh from a descriptor plus
/// caller options on every create call, never stored.
#[derive(Debug, Clone, Default)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    /// `NAME=value` entries.
    pub env: Vec<String>,
    pub exposed_ports: Vec<u16>,
    pub port_bindings: Vec<PortMapping>,
    pub binds: Vec<BindMount>,
    pub labels: HashMap<String, String>,
    /// `container:alias` entries.
    pub links: Vec<String>,
    pub user: Option<String>,
}

/// Engine capability set required by the orchestration layer.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Lists every container, running or not.
    async fn list_all(&self) -> Result<Vec<ContainerInstance>>;

    /// Lists every container, running or not, whose labels contain the given
    /// pair. Returns an empty vec, never an error, when nothing matches.
    async fn list_by_label(&self, key: &str, value: &str) -> Result<Vec<ContainerInstance>>;

    async fn inspect(&self, name: &str) -> Result<ContainerDetails>;

    /// Creates a container from the spec and returns its engine identifier.
    async fn create(&self, spec: &ContainerSpec) -> Result<String>;

    async fn start(&self, name: &str) -> Result<()>;

    async fn stop(&self, name: &str) -> Result<()>;

    /// Forced removal, including anonymous volumes.
    async fn remove(&self, name: &str) -> Result<()>;

    /// Pulls an image, consuming the progress stream and logging each status
    /// line. A failure to initiate the pull is an error; a failure mid-stream
    /// is treated as stream termination.
    async fn pull(&self, image: &str) -> Result<()>;

    /// Tags under which an image is known locally. Empty when the image is
    /// not present.
    async fn image_tags(&self, image: &str) -> Result<Vec<String>>;

    /// Runs a command detached inside a running container.
    async fn exec_detached(&self, container: &str, user: &str, cmd: Vec<String>) -> Result<()>;

    /// Streams a tar archive into a directory of a running container.
    async fn copy_archive(&self, container: &str, path: &str, archive: Vec<u8>) -> Result<()>;

    /// Follows the container's combined stdout/stderr, writing it to this
    /// process's stdout until the stream ends.
    async fn tail_logs(&self, container: &str) -> Result<()>;
}

/// Consumes a pull progress stream, logging each status line. An error before
/// any progress event means the pull never started and is fatal; an error
/// after progress has flowed is treated as stream termination.
async fn consume_pull_stream(
    image: &str,
    mut stream: impl Stream<Item = std::result::Result<CreateImageInfo, bollard::errors::Error>>
        + Unpin,
) -> Result<()> {
    let mut received_any = false;
    while let Some(event) = stream.next().await {
        match event {
            Ok(progress) => {
                received_any = true;
                info!(
                    id = progress.id.as_deref().unwrap_or_default(),
                    status = progress.status.as_deref().unwrap_or_default(),
                    progress = progress.progress.as_deref().unwrap_or_default(),
                    "Pulling image"
                );
            }
            Err(source) if !received_any => {
                return Err(LpnError::Pull {
                    image: image.to_string(),
                    source,
                });
            }
            Err(source) => {
                warn!(image, error = %source, "Image pull stream ended early");
                break;
            }
        }
    }

    Ok(())
}

/// [`ContainerRuntime`] backed by the Docker engine API.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    async fn list(&self, filters: HashMap<String, Vec<String>>) -> Result<Vec<ContainerInstance>> {
        let summaries = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: true,
                filters,
                ..Default::default()
            }))
            .await?;

        Ok(summaries
            .into_iter()
            .map(|summary| ContainerInstance {
                id: summary.id.unwrap_or_default(),
                name: summary
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default(),
                image: summary.image.unwrap_or_default(),
                status: summary.status.unwrap_or_default(),
                labels: summary.labels.unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_all(&self) -> Result<Vec<ContainerInstance>> {
        self.list(HashMap::new()).await
    }

    async fn list_by_label(&self, key: &str, value: &str) -> Result<Vec<ContainerInstance>> {
        let mut filters = HashMap::new();
        filters.insert("label".to_string(), vec![format!("{key}={value}")]);
        self.list(filters).await
    }

    async fn inspect(&self, name: &str) -> Result<ContainerDetails> {
        let inspected = self.docker.inspect_container(name, None).await?;

        let image = inspected
            .config
            .and_then(|c| c.image)
            .unwrap_or_default();

        let mut host_ports = HashMap::new();
        let bindings = inspected
            .host_config
            .and_then(|h| h.port_bindings)
            .unwrap_or_default();
        for (port, binding) in bindings {
            let container_port = port
                .split('/')
                .next()
                .and_then(|p| p.parse::<u16>().ok());
            let host_port = binding
                .unwrap_or_default()
                .first()
                .and_then(|b| b.host_port.clone());
            if let (Some(container_port), Some(host_port)) = (container_port, host_port) {
                host_ports.insert(container_port, host_port);
            }
        }

        Ok(ContainerDetails { image, host_ports })
    }

    async fn create(&self, spec: &ContainerSpec) -> Result<String> {
        let exposed_ports = spec
            .exposed_ports
            .iter()
            .map(|port| (format!("{port}/tcp"), HashMap::new()))
            .collect::<HashMap<String, HashMap<(), ()>>>();

        let port_bindings = spec
            .port_bindings
            .iter()
            .map(|mapping| {
                (
                    format!("{}/tcp", mapping.container_port),
                    Some(vec![PortBinding {
                        host_ip: Some("0.0.0.0".to_string()),
                        host_port: Some(mapping.host_port.to_string()),
                    }]),
                )
            })
            .collect::<HashMap<_, _>>();

        let mounts = spec
            .binds
            .iter()
            .map(|bind| Mount {
                source: Some(bind.source.to_string_lossy().into_owned()),
                target: Some(bind.target.clone()),
                typ: Some(MountTypeEnum::BIND),
                ..Default::default()
            })
            .collect::<Vec<_>>();

        let config = Config {
            image: Some(spec.image.clone()),
            env: Some(spec.env.clone()),
            exposed_ports: Some(exposed_ports),
            labels: Some(spec.labels.clone()),
            user: spec.user.clone(),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                mounts: Some(mounts),
                links: Some(spec.links.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container(
                Some(CreateContainerOptions {
                    name: spec.name.clone(),
                    ..Default::default()
                }),
                config,
            )
            .await?;

        Ok(created.id)
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.docker
            .start_container(name, None::<StartContainerOptions<String>>)
            .await?;
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.docker
            .stop_container(name, None::<StopContainerOptions>)
            .await?;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<()> {
        self.docker
            .remove_container(
                name,
                Some(RemoveContainerOptions {
                    force: true,
                    v: true,
                    ..Default::default()
                }),
            )
            .await?;
        Ok(())
    }

    async fn pull(&self, image: &str) -> Result<()> {
        let stream = self.docker.create_image(
            Some(CreateImageOptions {
                from_image: image.to_string(),
                ..Default::default()
            }),
            None,
            None,
        );

        consume_pull_stream(image, stream).await
    }

    async fn image_tags(&self, image: &str) -> Result<Vec<String>> {
        match self.docker.inspect_image(image).await {
            Ok(inspected) => Ok(inspected.repo_tags.unwrap_or_default()),
            // An unknown image is simply "no tags", not a failure.
            Err(_) => Ok(Vec::new()),
        }
    }

    async fn exec_detached(&self, container: &str, user: &str, cmd: Vec<String>) -> Result<()> {
        let exec = self
            .docker
            .create_exec(
                container,
                CreateExecOptions {
                    user: Some(user.to_string()),
                    cmd: Some(cmd),
                    attach_stdin: Some(false),
                    attach_stdout: Some(false),
                    attach_stderr: Some(false),
                    tty: Some(false),
                    ..Default::default()
                },
            )
            .await?;

        self.docker
            .start_exec(
                &exec.id,
                Some(StartExecOptions {
                    detach: true,
                    ..Default::default()
                }),
            )
            .await?;

        Ok(())
    }

    async fn copy_archive(&self, container: &str, path: &str, archive: Vec<u8>) -> Result<()> {
        self.docker
            .upload_to_container(
                container,
                Some(UploadToContainerOptions::<String> {
                    path: path.to_string(),
                    ..Default::default()
                }),
                bytes::Bytes::from(archive),
            )
            .await?;
        Ok(())
    }

    async fn tail_logs(&self, container: &str) -> Result<()> {
        let mut stream = self.docker.logs(
            container,
            Some(LogsOptions::<String> {
                follow: true,
                stdout: true,
                stderr: true,
                tail: "all".to_string(),
                ..Default::default()
            }),
        );

        while let Some(entry) = stream.next().await {
            let output = entry?;
            print!("{output}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type PullEvent = std::result::Result<CreateImageInfo, bollard::errors::Error>;

    fn progress(status: &str) -> PullEvent {
        Ok(CreateImageInfo {
            status: Some(status.to_string()),
            ..Default::default()
        })
    }

    fn failure() -> PullEvent {
        Err(std::io::Error::other("registry unreachable").into())
    }

    #[tokio::test]
    async fn pull_error_before_any_progress_is_fatal() {
        let result = consume_pull_stream("liferay/portal:7.2.1-ga2", stream::iter([failure()])).await;

        assert!(matches!(
            result,
            Err(LpnError::Pull { ref image, .. }) if image == "liferay/portal:7.2.1-ga2"
        ));
    }

    #[tokio::test]
    async fn pull_error_after_progress_ends_the_stream_cleanly() {
        let events = [
            progress("Pulling fs layer"),
            failure(),
            progress("never delivered"),
        ];

        consume_pull_stream("liferay/portal:7.2.1-ga2", stream::iter(events))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn pull_of_an_empty_stream_succeeds() {
        consume_pull_stream("liferay/portal:7.2.1-ga2", stream::iter(Vec::<PullEvent>::new()))
            .await
            .unwrap();
    }
}
