//! Integration tests against a real Docker engine.
//!
//! Run with: cargo test --test docker_integration -- --ignored

use std::collections::HashMap;
use std::sync::Arc;

use lpn_core::lifecycle::LifecycleManager;
use lpn_core::runtime::{ContainerRuntime, ContainerSpec, DockerRuntime};

fn runtime() -> Arc<DockerRuntime> {
    Arc::new(DockerRuntime::new(lpn_core::client::connect().unwrap()))
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn engine_is_reachable() {
    let docker = lpn_core::client::connect().unwrap();
    lpn_core::client::ping(&docker).await.unwrap();
    assert!(lpn_core::client::engine_version(&docker).await.is_ok());
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn labeled_container_roundtrip() {
    let runtime = runtime();
    runtime.pull("alpine:latest").await.unwrap();

    let name = format!("lpn-it-{}", std::process::id());
    let spec = ContainerSpec {
        name: name.clone(),
        image: "alpine:latest".to_string(),
        labels: HashMap::from([("lpn-type".to_string(), "it-test".to_string())]),
        ..Default::default()
    };
    runtime.create(&spec).await.unwrap();

    let manager = LifecycleManager::new(runtime.clone());
    assert!(manager.exists(&name).await.unwrap());

    let matches = runtime.list_by_label("lpn-type", "it-test").await.unwrap();
    assert!(matches.iter().any(|c| c.name == name));
    assert!(runtime
        .list_by_label("lpn-type", "some-other-variant")
        .await
        .unwrap()
        .is_empty());

    runtime.remove(&name).await.unwrap();
    assert!(!manager.exists(&name).await.unwrap());
}

#[tokio::test]
#[ignore = "Requires Docker"]
async fn image_tags_reports_local_presence() {
    let runtime = runtime();
    runtime.pull("alpine:latest").await.unwrap();

    let tags = runtime.image_tags("alpine:latest").await.unwrap();
    assert!(tags.iter().any(|t| t == "alpine:latest"));

    let missing = runtime
        .image_tags("lpn-core/does-not-exist:never")
        .await
        .unwrap();
    assert!(missing.is_empty());
}
