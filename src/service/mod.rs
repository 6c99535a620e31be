//! Service model.
//!
//! A [`Service`] is one container description plus role metadata. The
//! metadata lives in an engine-facing string label map; typed access to it
//! goes through [`labels`], which keeps all label parsing at one boundary.

pub mod labels;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use labels::{Purpose, ServiceMetadata};

/// A single host-side port binding, docker style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortBinding {
    /// Host interface to bind; empty means all interfaces.
    pub host_ip: String,
    /// Host port, as the engine encodes it.
    pub host_port: String,
}

impl PortBinding {
    /// Creates a binding on all interfaces for the given host port.
    pub fn port(host_port: impl Into<String>) -> Self {
        Self {
            host_ip: String::new(),
            host_port: host_port.into(),
        }
    }
}

/// Container restart policy, carried through the merge untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartPolicy {
    /// Policy name (`always`, `unless-stopped`, ...).
    pub name: String,
    /// Retry limit for `on-failure`.
    pub maximum_retry_count: u32,
}

impl RestartPolicy {
    /// The `always` policy used by the long-running catalog daemons.
    pub fn always() -> Self {
        Self {
            name: "always".to_string(),
            maximum_retry_count: 0,
        }
    }
}

/// Port binding map: container port spec (`"80/tcp"`) to host bindings.
pub type PortMap = HashMap<String, Vec<PortBinding>>;

/// One named container descriptor plus role metadata.
///
/// Every field has a zero value so the fill-gaps merge can tell "absent"
/// from "user supplied". A `Service` accepted by validation always has a
/// non-empty `image` and a non-empty `pygmy.name` label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Container image reference.
    pub image: String,

    /// Engine-facing label map; recognized keys are the `pygmy.*` set.
    pub labels: HashMap<String, String>,

    /// Host port bindings; `None` means "use the catalog default ports"
    /// for the services that have them.
    pub port_bindings: Option<PortMap>,

    /// Restart policy; passed to the engine as-is.
    pub restart_policy: Option<RestartPolicy>,

    /// Command override for one-shot containers (key adder/shower).
    pub command: Vec<String>,

    /// Explicit per-service opt-in for catalog defaults, distinct from the
    /// `pygmy.defaults` label.
    pub defaults: bool,

    /// When set, replaces `image` after validation.
    pub image_override: Option<String>,
}

impl Service {
    /// Typed view of the recognized labels.
    pub fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata::parse(&self.labels)
    }

    /// The `pygmy.name` label, when present and non-empty.
    pub fn name(&self) -> Option<String> {
        self.metadata().name
    }

    /// The `pygmy.purpose` label, when present.
    pub fn purpose(&self) -> Option<Purpose> {
        self.metadata().purpose
    }

    /// The `pygmy.weight` label; 0 when absent or unparseable.
    pub fn weight(&self) -> i32 {
        self.metadata().weight
    }

    /// Whether the `pygmy.defaults` label is truthy.
    pub fn defaults_label(&self) -> bool {
        self.metadata().defaults
    }

    /// Whether the container's output should be surfaced to the user.
    pub fn output(&self) -> bool {
        self.metadata().output
    }
}
