//! Deterministic startup ordering.
//!
//! Map iteration order is unspecified, so ordering is imposed explicitly:
//! every service becomes a sortable token of zero-padded weight plus key,
//! and the list of tokens is sorted lexicographically. The padding keeps
//! multi-digit weights in numeric order ("9" would otherwise sort after
//! "10"); the key suffix breaks ties alphabetically.

use crate::service::{Purpose, Service};
use std::collections::HashMap;

/// Separator between the weight prefix and the service key. Keys never
/// contain it.
const TOKEN_SEPARATOR: char = '|';

/// Converts the final service map into the ordered startup sequence of
/// service keys.
///
/// The entry carrying the `sshagent` purpose sentinel is excluded from the
/// weighted pool and prepended unconditionally: the agent must be up before
/// anything that mounts its socket, and weights only express relative order
/// among peers.
pub fn services_sorted(services: &HashMap<String, Service>) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut ssh_agent_key = None;

    for (key, service) in services {
        if service.purpose() == Some(Purpose::SshAgent) {
            ssh_agent_key = Some(key.clone());
        } else {
            tokens.push(format!(
                "{:06}{}{}",
                service.weight(),
                TOKEN_SEPARATOR,
                key
            ));
        }
    }

    tokens.sort();

    let mut sorted: Vec<String> = tokens
        .iter()
        .filter_map(|token| token.split_once(TOKEN_SEPARATOR))
        .map(|(_, key)| key.to_string())
        .collect();

    if let Some(key) = ssh_agent_key {
        sorted.insert(0, key);
    }

    sorted
}
