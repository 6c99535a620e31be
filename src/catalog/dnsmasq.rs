//! DNS resolver (dnsmasq) catalog entry.

use crate::catalog::DNSMASQ_KEY;
use crate::service::{PortBinding, RestartPolicy, Service, ServiceMetadata};

/// Default descriptor for the dnsmasq container.
///
/// Answers every lookup under the configured domain with 127.0.0.1; the
/// host resolver files generated at defaulting time point at port 6053.
pub fn dnsmasq(domain: &str) -> Service {
    Service {
        image: "pygmystack/dnsmasq".to_string(),
        labels: ServiceMetadata {
            name: Some(DNSMASQ_KEY.to_string()),
            purpose: None,
            weight: 13,
            defaults: false,
            output: false,
        }
        .to_labels(),
        port_bindings: Some(
            [
                (
                    "53/tcp".to_string(),
                    vec![PortBinding {
                        host_ip: "127.0.0.1".to_string(),
                        host_port: "6053".to_string(),
                    }],
                ),
                (
                    "53/udp".to_string(),
                    vec![PortBinding {
                        host_ip: "127.0.0.1".to_string(),
                        host_port: "6053".to_string(),
                    }],
                ),
            ]
            .into_iter()
            .collect(),
        ),
        restart_policy: Some(RestartPolicy::always()),
        command: vec![
            "--log-facility=-".to_string(),
            "-A".to_string(),
            format!("/{}/127.0.0.1", domain),
        ],
        defaults: true,
        ..Service::default()
    }
}
