//! SSH agent catalog entry.

use crate::catalog::SSH_AGENT_KEY;
use crate::service::{labels, RestartPolicy, Service, ServiceMetadata};

/// Default descriptor for the SSH agent container.
///
/// Carries the `sshagent` purpose sentinel, so the sorter always schedules
/// it first; other services mount its socket.
pub fn ssh_agent() -> Service {
    Service {
        image: "pygmystack/ssh-agent".to_string(),
        labels: ServiceMetadata {
            name: Some(SSH_AGENT_KEY.to_string()),
            purpose: Some(labels::Purpose::SshAgent),
            weight: 10,
            defaults: false,
            output: false,
        }
        .to_labels(),
        restart_policy: Some(RestartPolicy::always()),
        defaults: true,
        ..Service::default()
    }
}
