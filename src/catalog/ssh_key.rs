//! SSH key adder and shower catalog entries.
//!
//! Both are one-shot containers sharing the agent's image: the adder loads
//! a key into the running agent, the shower lists what the agent holds.
//! Their output is surfaced to the user.

use crate::catalog::SSH_AGENT_ADD_KEY_KEY;
use crate::service::{Purpose, Service, ServiceMetadata};

/// Default key path the adder loads when the user supplies none.
const DEFAULT_KEY_PATH: &str = "/root/.ssh/id_rsa";

/// Default descriptor for the one-shot key adder container.
pub fn ssh_key_adder() -> Service {
    Service {
        image: "pygmystack/ssh-agent".to_string(),
        labels: ServiceMetadata {
            name: Some(SSH_AGENT_ADD_KEY_KEY.to_string()),
            purpose: Some(Purpose::AddKeys),
            weight: 11,
            defaults: false,
            output: true,
        }
        .to_labels(),
        command: vec!["ssh-add".to_string(), DEFAULT_KEY_PATH.to_string()],
        defaults: true,
        ..Service::default()
    }
}

/// Descriptor for the one-shot key shower container.
///
/// Not in the default import list; `status` constructs it on demand.
pub fn ssh_key_shower() -> Service {
    Service {
        image: "pygmystack/ssh-agent".to_string(),
        labels: ServiceMetadata {
            name: Some("amazeeio-ssh-agent-show-keys".to_string()),
            purpose: Some(Purpose::ShowKeys),
            weight: 12,
            defaults: false,
            output: true,
        }
        .to_labels(),
        command: vec!["ssh-add".to_string(), "-l".to_string()],
        defaults: false,
        ..Service::default()
    }
}
