//! Reverse proxy (haproxy) catalog entry.

use crate::catalog::HAPROXY_KEY;
use crate::service::{PortBinding, RestartPolicy, Service, ServiceMetadata};

/// Default descriptor for the haproxy container, without port bindings.
///
/// Ports are a separate template so an explicit user binding map suppresses
/// the canonical port 80 instead of being merged with it.
pub fn haproxy() -> Service {
    Service {
        image: "pygmystack/haproxy".to_string(),
        labels: ServiceMetadata {
            name: Some(HAPROXY_KEY.to_string()),
            purpose: None,
            weight: 14,
            defaults: false,
            output: false,
        }
        .to_labels(),
        restart_policy: Some(RestartPolicy::always()),
        defaults: true,
        ..Service::default()
    }
}

/// Port-only template merged into the haproxy entry when the user declared
/// no bindings: the canonical HTTP port.
pub fn haproxy_default_ports() -> Service {
    Service {
        port_bindings: Some(
            [("80/tcp".to_string(), vec![PortBinding::port("80")])]
                .into_iter()
                .collect(),
        ),
        ..Service::default()
    }
}
