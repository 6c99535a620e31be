//! Default import precedence and fill-gaps merging.
//!
//! A catalog default can be requested from three independent places: the
//! destination entry's `pygmy.defaults` label, its field-level `defaults`
//! flag, or the catalog entry itself. The precedence below is evaluated in
//! order, first match wins, so the sources never double-apply and never
//! silently discard a user's explicit override.

use crate::config::Config;
use crate::runtime::{Network, Volume};
use crate::service::Service;

/// Decides whether to import a catalog default into `config.services[key]`
/// and performs the import.
///
/// Returns whether an import occurred. Precedence, first match wins:
/// 1. entry exists and its `pygmy.defaults` label is truthy: replace the
///    whole entry with the catalog default;
/// 2. entry exists and its field-level `defaults` flag is set: fill gaps
///    from the catalog default;
/// 3. entry exists and the catalog default's `pygmy.defaults` label is
///    truthy: fill gaps;
/// 4. no entry and the catalog default's field-level flag is set: import
///    the default wholesale;
/// 5. otherwise nothing happens.
pub fn import_defaults(config: &mut Config, key: &str, default: Service) -> bool {
    match config.services.get(key).cloned() {
        Some(existing) => {
            if existing.defaults_label() {
                let imported = merged_service(&default, &Service::default());
                config.services.insert(key.to_string(), imported);
                return true;
            }

            if existing.defaults {
                let imported = merged_service(&default, &existing);
                config.services.insert(key.to_string(), imported);
                return true;
            }

            if default.defaults_label() {
                let imported = merged_service(&default, &existing);
                config.services.insert(key.to_string(), imported);
                return true;
            }
        }
        None => {
            if default.defaults {
                let imported = merged_service(&default, &Service::default());
                config.services.insert(key.to_string(), imported);
                return true;
            }
        }
    }

    false
}

/// Shallow fill-gaps merge: a field from `default` is taken only where the
/// corresponding field in `existing` is the zero value. Label maps merge
/// key-by-key under the same rule. Not recursive beyond that.
pub fn merged_service(default: &Service, existing: &Service) -> Service {
    let mut labels = existing.labels.clone();
    for (key, value) in &default.labels {
        let gap = labels.get(key).map(|v| v.is_empty()).unwrap_or(true);
        if gap {
            labels.insert(key.clone(), value.clone());
        }
    }

    Service {
        image: if existing.image.is_empty() {
            default.image.clone()
        } else {
            existing.image.clone()
        },
        labels,
        port_bindings: existing
            .port_bindings
            .clone()
            .or_else(|| default.port_bindings.clone()),
        restart_policy: existing
            .restart_policy
            .clone()
            .or_else(|| default.restart_policy.clone()),
        command: if existing.command.is_empty() {
            default.command.clone()
        } else {
            existing.command.clone()
        },
        defaults: existing.defaults || default.defaults,
        image_override: existing
            .image_override
            .clone()
            .or_else(|| default.image_override.clone()),
    }
}

/// Fill-gaps merge for network descriptors.
pub fn merged_network(default: &Network, existing: &Network) -> Network {
    let mut labels = existing.labels.clone();
    for (key, value) in &default.labels {
        labels.entry(key.clone()).or_insert_with(|| value.clone());
    }

    Network {
        name: if existing.name.is_empty() {
            default.name.clone()
        } else {
            existing.name.clone()
        },
        driver: if existing.driver.is_empty() {
            default.driver.clone()
        } else {
            existing.driver.clone()
        },
        labels,
    }
}

/// Fill-gaps merge for volume descriptors.
pub fn merged_volume(default: &Volume, existing: &Volume) -> Volume {
    let mut labels = existing.labels.clone();
    for (key, value) in &default.labels {
        labels.entry(key.clone()).or_insert_with(|| value.clone());
    }

    Volume {
        name: if existing.name.is_empty() {
            default.name.clone()
        } else {
            existing.name.clone()
        },
        driver: if existing.driver.is_empty() {
            default.driver.clone()
        } else {
            existing.driver.clone()
        },
        labels,
    }
}
