//! Container runtime collaborator.
//!
//! The configuration core never talks to a container engine directly; it
//! consumes the declarative descriptors below and, at one point during
//! defaulting, asks the runtime for the live state of a named volume. The
//! orchestration layer in `main` drives the full lifecycle through the
//! [`ContainerRuntime`] trait.

pub mod docker;

use crate::error::Result;
use crate::service::Service;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use docker::DockerCli;

/// A named container network descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    /// Network name.
    pub name: String,
    /// Network driver; empty means the engine default.
    pub driver: String,
    /// Engine-facing labels.
    pub labels: HashMap<String, String>,
}

/// A named volume descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    /// Volume name.
    pub name: String,
    /// Volume driver; empty means the engine default.
    pub driver: String,
    /// Engine-facing labels.
    pub labels: HashMap<String, String>,
}

/// Container state as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// Container is running.
    Running,
    /// Container exists but is not running.
    Stopped,
    /// No container with that name exists.
    Absent,
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerState::Running => write!(f, "running"),
            ContainerState::Stopped => write!(f, "stopped"),
            ContainerState::Absent => write!(f, "absent"),
        }
    }
}

/// Trait for container engines.
///
/// Lifecycle operations are thin pass-throughs; retries, concurrency and
/// registry negotiation are deliberately not part of this interface.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Returns the name of this runtime.
    fn name(&self) -> &'static str;

    /// Creates a container for a service under the given name, attached to
    /// the given network. Does not start it.
    async fn container_create(
        &self,
        name: &str,
        service: &Service,
        network: &str,
    ) -> Result<()>;

    /// Starts a previously created container.
    async fn container_start(&self, name: &str) -> Result<()>;

    /// Stops a running container.
    async fn container_stop(&self, name: &str) -> Result<()>;

    /// Removes a container.
    async fn container_remove(&self, name: &str) -> Result<()>;

    /// Reports the state of a named container.
    async fn container_state(&self, name: &str) -> Result<ContainerState>;

    /// Fetches the combined output of a container.
    async fn container_logs(&self, name: &str) -> Result<String>;

    /// Creates a network from a descriptor.
    async fn network_create(&self, network: &Network) -> Result<()>;

    /// Returns whether a named network exists.
    async fn network_exists(&self, name: &str) -> Result<bool>;

    /// Creates a volume from a descriptor.
    async fn volume_create(&self, volume: &Volume) -> Result<()>;

    /// Returns the live descriptor of a named volume, when one exists.
    async fn volume_get(&self, name: &str) -> Result<Option<Volume>>;
}

/// A runtime that does nothing and knows nothing.
///
/// Used by `config validate` / `config show`, where setup must run without
/// touching an engine, and by tests.
#[derive(Debug, Default)]
pub struct NullRuntime;

#[async_trait]
impl ContainerRuntime for NullRuntime {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn container_create(&self, _: &str, _: &Service, _: &str) -> Result<()> {
        Ok(())
    }

    async fn container_start(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn container_stop(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn container_remove(&self, _: &str) -> Result<()> {
        Ok(())
    }

    async fn container_state(&self, _: &str) -> Result<ContainerState> {
        Ok(ContainerState::Absent)
    }

    async fn container_logs(&self, _: &str) -> Result<String> {
        Ok(String::new())
    }

    async fn network_create(&self, _: &Network) -> Result<()> {
        Ok(())
    }

    async fn network_exists(&self, _: &str) -> Result<bool> {
        Ok(false)
    }

    async fn volume_create(&self, _: &Volume) -> Result<()> {
        Ok(())
    }

    async fn volume_get(&self, _: &str) -> Result<Option<Volume>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_state_display() {
        assert_eq!(format!("{}", ContainerState::Running), "running");
        assert_eq!(format!("{}", ContainerState::Stopped), "stopped");
        assert_eq!(format!("{}", ContainerState::Absent), "absent");
    }

    #[tokio::test]
    async fn test_null_runtime_reports_nothing() {
        let runtime = NullRuntime;

        assert_eq!(runtime.name(), "null");
        assert_eq!(runtime.volume_get("anything").await.unwrap(), None);
        assert_eq!(
            runtime.container_state("anything").await.unwrap(),
            ContainerState::Absent
        );
        assert!(!runtime.network_exists("anything").await.unwrap());
    }
}
