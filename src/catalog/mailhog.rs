//! Mail sink (mailhog) catalog entry.

use crate::catalog::MAILHOG_KEY;
use crate::service::{PortBinding, RestartPolicy, Service, ServiceMetadata};

/// Default descriptor for the mailhog container, without port bindings.
pub fn mailhog() -> Service {
    Service {
        image: "pygmystack/mailhog".to_string(),
        labels: ServiceMetadata {
            name: Some(MAILHOG_KEY.to_string()),
            purpose: None,
            weight: 15,
            defaults: false,
            output: false,
        }
        .to_labels(),
        restart_policy: Some(RestartPolicy::always()),
        defaults: true,
        ..Service::default()
    }
}

/// Port-only template merged into the mailhog entry when the user declared
/// no bindings: the SMTP sink port and its web UI.
pub fn mailhog_default_ports() -> Service {
    Service {
        port_bindings: Some(
            [
                ("1025/tcp".to_string(), vec![PortBinding::port("1025")]),
                ("8025/tcp".to_string(), vec![PortBinding::port("8025")]),
            ]
            .into_iter()
            .collect(),
        ),
        ..Service::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailhog_carries_no_ports() {
        assert!(mailhog().port_bindings.is_none());
    }

    #[test]
    fn test_default_ports_cover_smtp_and_ui() {
        let bindings = mailhog_default_ports().port_bindings.unwrap();
        assert_eq!(bindings["1025/tcp"][0].host_port, "1025");
        assert_eq!(bindings["8025/tcp"][0].host_port, "8025");
    }
}
