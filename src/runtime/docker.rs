//! Docker CLI runtime implementation.
//!
//! Drives the container engine by spawning the `docker` binary. Argument
//! vectors are built structurally (no shell involved) by pure helpers so
//! the mapping from a [`Service`] descriptor to a command line is testable
//! without an engine.

use crate::error::{PygmyError, Result};
use crate::runtime::{ContainerRuntime, ContainerState, Network, Volume};
use crate::service::Service;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Default timeout for one engine call in seconds.
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 60;

/// Container runtime backed by the `docker` command line client.
pub struct DockerCli {
    /// Binary to invoke; `docker` unless overridden.
    binary: String,
    /// Per-call timeout.
    timeout: Duration,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    /// Creates a runtime using the `docker` binary on PATH.
    pub fn new() -> Self {
        Self {
            binary: "docker".to_string(),
            timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
        }
    }

    /// Overrides the binary, e.g. `podman`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::new()
        }
    }

    /// Runs one engine command and returns its stdout.
    ///
    /// A non-zero exit status is a runtime error carrying the engine's
    /// stderr; callers that tolerate failure use `execute_raw` and
    /// inspect the status themselves.
    async fn execute(&self, args: &[String]) -> Result<String> {
        let (success, stdout, stderr) = self.execute_raw(args).await?;
        if !success {
            return Err(PygmyError::runtime(format!(
                "{} {} failed: {}",
                self.binary,
                args.first().map(String::as_str).unwrap_or(""),
                stderr.trim()
            )));
        }
        Ok(stdout)
    }

    async fn execute_raw(&self, args: &[String]) -> Result<(bool, String, String)> {
        debug!(binary = %self.binary, ?args, "Executing engine command");

        let output = timeout(
            self.timeout,
            Command::new(&self.binary)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        .map_err(|_| PygmyError::Timeout {
            operation: format!("{} {}", self.binary, args.join(" ")),
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| {
            PygmyError::runtime_with_source(format!("Failed to execute '{}'", self.binary), e)
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(
            exit_code = output.status.code(),
            stderr = %stderr.trim(),
            "Engine command completed"
        );

        Ok((output.status.success(), stdout, stderr))
    }
}

/// Builds the `docker create` argument vector for a service.
pub fn create_args(name: &str, service: &Service, network: &str) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        "--name".to_string(),
        name.to_string(),
    ];

    if !network.is_empty() {
        args.push("--network".to_string());
        args.push(network.to_string());
    }

    // Deterministic argument order for a map-backed label set.
    let mut labels: Vec<_> = service.labels.iter().collect();
    labels.sort();
    for (key, value) in labels {
        args.push("--label".to_string());
        args.push(format!("{}={}", key, value));
    }

    if let Some(bindings) = &service.port_bindings {
        let mut ports: Vec<_> = bindings.iter().collect();
        ports.sort_by(|a, b| a.0.cmp(b.0));
        for (port_spec, host_bindings) in ports {
            for binding in host_bindings {
                args.push("--publish".to_string());
                args.push(publish_arg(port_spec, &binding.host_ip, &binding.host_port));
            }
        }
    }

    if let Some(policy) = &service.restart_policy {
        args.push("--restart".to_string());
        if policy.maximum_retry_count > 0 {
            args.push(format!("{}:{}", policy.name, policy.maximum_retry_count));
        } else {
            args.push(policy.name.clone());
        }
    }

    args.push(service.image.clone());
    args.extend(service.command.iter().cloned());

    args
}

/// Renders one `--publish` value from a container port spec and a binding.
fn publish_arg(port_spec: &str, host_ip: &str, host_port: &str) -> String {
    // port_spec is "<port>/<proto>"; docker wants "[ip:]host:port/proto".
    if host_ip.is_empty() {
        format!("{}:{}", host_port, port_spec)
    } else {
        format!("{}:{}:{}", host_ip, host_port, port_spec)
    }
}

/// Shape of `docker volume inspect --format '{{json .}}'` output.
#[derive(Debug, Deserialize)]
struct VolumeInspect {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Driver", default)]
    driver: String,
    #[serde(rename = "Labels", default)]
    labels: Option<HashMap<String, String>>,
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn container_create(&self, name: &str, service: &Service, network: &str) -> Result<()> {
        self.execute(&create_args(name, service, network)).await?;
        Ok(())
    }

    async fn container_start(&self, name: &str) -> Result<()> {
        self.execute(&["start".to_string(), name.to_string()]).await?;
        Ok(())
    }

    async fn container_stop(&self, name: &str) -> Result<()> {
        self.execute(&["stop".to_string(), name.to_string()]).await?;
        Ok(())
    }

    async fn container_remove(&self, name: &str) -> Result<()> {
        self.execute(&["rm".to_string(), "--force".to_string(), name.to_string()])
            .await?;
        Ok(())
    }

    async fn container_state(&self, name: &str) -> Result<ContainerState> {
        let args = vec![
            "inspect".to_string(),
            "--format".to_string(),
            "{{.State.Running}}".to_string(),
            name.to_string(),
        ];
        let (success, stdout, _stderr) = self.execute_raw(&args).await?;
        if !success {
            return Ok(ContainerState::Absent);
        }
        match stdout.trim() {
            "true" => Ok(ContainerState::Running),
            _ => Ok(ContainerState::Stopped),
        }
    }

    async fn container_logs(&self, name: &str) -> Result<String> {
        self.execute(&["logs".to_string(), name.to_string()]).await
    }

    async fn network_create(&self, network: &Network) -> Result<()> {
        let mut args = vec!["network".to_string(), "create".to_string()];
        if !network.driver.is_empty() {
            args.push("--driver".to_string());
            args.push(network.driver.clone());
        }
        let mut labels: Vec<_> = network.labels.iter().collect();
        labels.sort();
        for (key, value) in labels {
            args.push("--label".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(network.name.clone());
        self.execute(&args).await?;
        Ok(())
    }

    async fn network_exists(&self, name: &str) -> Result<bool> {
        let args = vec![
            "network".to_string(),
            "inspect".to_string(),
            name.to_string(),
        ];
        let (success, _stdout, _stderr) = self.execute_raw(&args).await?;
        Ok(success)
    }

    async fn volume_create(&self, volume: &Volume) -> Result<()> {
        let mut args = vec!["volume".to_string(), "create".to_string()];
        if !volume.driver.is_empty() {
            args.push("--driver".to_string());
            args.push(volume.driver.clone());
        }
        let mut labels: Vec<_> = volume.labels.iter().collect();
        labels.sort();
        for (key, value) in labels {
            args.push("--label".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(volume.name.clone());
        self.execute(&args).await?;
        Ok(())
    }

    async fn volume_get(&self, name: &str) -> Result<Option<Volume>> {
        let args = vec![
            "volume".to_string(),
            "inspect".to_string(),
            "--format".to_string(),
            "{{json .}}".to_string(),
            name.to_string(),
        ];
        let (success, stdout, _stderr) = self.execute_raw(&args).await?;
        if !success {
            return Ok(None);
        }

        let inspect: VolumeInspect = serde_json::from_str(stdout.trim())?;
        Ok(Some(Volume {
            name: inspect.name,
            driver: inspect.driver,
            labels: inspect.labels.unwrap_or_default(),
        }))
    }
}
