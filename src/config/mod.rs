//! Configuration module for pygmy.
//!
//! The [`Config`] aggregate is created once per CLI invocation from the
//! user's YAML file, mutated in place by defaulting, validation and
//! sorting, and discarded after the orchestration layer has consumed
//! `sorted_services`. Nothing here persists state.

pub mod merge;
pub mod resolver;
pub mod sort;

#[cfg(test)]
mod merge_tests;

pub use resolver::{default_resolvers, Platform, Resolv};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog;
use crate::error::{PygmyError, Result};
use crate::runtime::{ContainerRuntime, Network, Volume};
use crate::service::{labels, Service};

/// Domain used when the configuration supplies none.
pub const DEFAULT_DOMAIN: &str = "docker.amazee.io";

/// Environment variable for the configuration file path.
pub const ENV_CONFIG_PATH: &str = "PYGMY_CONFIG";

/// What to do when the configuration file fails to decode.
///
/// The historic behavior of logging the decode error and carrying on with
/// a possibly half-decoded aggregate is deliberately not reproduced;
/// lenient mode is the explicit opt-in that continues, and it continues
/// from the built-in defaults rather than from garbage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// A decode failure is an error.
    #[default]
    Fatal,
    /// A decode failure logs a warning and falls back to defaults.
    Lenient,
}

/// Application configuration aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Master switch for importing catalog defaults.
    pub defaults: bool,

    /// Domain the local services answer under.
    pub domain: String,

    /// Service map, keyed by catalog slot (distinct from the `pygmy.name`
    /// label).
    pub services: HashMap<String, Service>,

    /// Network map, seeded with the built-in network when empty.
    pub networks: HashMap<String, Network>,

    /// Volume map; entries are resolved against live engine state.
    pub volumes: HashMap<String, Volume>,

    /// Host resolver file descriptors, chosen once per platform.
    pub resolvers: Vec<Resolv>,

    /// Startup order produced by the sorter; consumed by the
    /// orchestration layer.
    #[serde(skip)]
    pub sorted_services: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: true,
            domain: String::new(),
            services: HashMap::new(),
            networks: HashMap::new(),
            volumes: HashMap::new(),
            resolvers: Vec::new(),
            sorted_services: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional path with the fatal decode
    /// policy. If path is `None`, the default search paths are tried; when
    /// no file exists, the built-in defaults are used.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        Self::load_with_policy(path, DecodePolicy::Fatal)
    }

    /// Loads configuration from an optional path with an explicit decode
    /// policy.
    pub fn load_with_policy<P: AsRef<Path>>(path: Option<P>, policy: DecodePolicy) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p, policy),
            None => {
                for candidate in Self::default_paths() {
                    if candidate.exists() {
                        return Self::load_from_path(candidate, policy);
                    }
                }

                // No config file found, use defaults
                Ok(Self::default())
            }
        }
    }

    /// Default configuration file locations, in search order.
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".pygmy.yml"));
            paths.push(home.join(".pygmy.yaml"));
        }
        paths
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P, policy: DecodePolicy) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PygmyError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&content, policy)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str, policy: DecodePolicy) -> Result<Self> {
        match serde_yaml::from_str::<Config>(content) {
            Ok(config) => Ok(config),
            Err(e) => match policy {
                DecodePolicy::Fatal => Err(PygmyError::config_with_source(
                    "Failed to parse config",
                    e,
                )),
                DecodePolicy::Lenient => {
                    warn!(error = %e, "Failed to parse config, continuing with defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Merges in the catalog defaults, validates the result, applies image
    /// overrides and computes the startup order.
    ///
    /// The runtime is consulted only for the live state of configured
    /// volumes; the resolver set is chosen once from `platform` and not
    /// re-derived afterwards.
    pub async fn setup(&mut self, runtime: &dyn ContainerRuntime, platform: Platform) -> Result<()> {
        if self.domain.is_empty() {
            self.domain = DEFAULT_DOMAIN.to_string();
        }

        if self.defaults {
            self.import_catalog_defaults();
            self.backfill_default_ports();
            self.seed_network();
            self.resolve_volumes(runtime).await;

            if self.resolvers.is_empty() {
                self.resolvers = default_resolvers(platform, &self.domain);
            }
        }

        self.validate()?;
        self.apply_image_overrides();
        self.sorted_services = sort::services_sorted(&self.services);

        Ok(())
    }

    /// Runs the merger for each built-in catalog service under its fixed
    /// key.
    fn import_catalog_defaults(&mut self) {
        let domain = self.domain.clone();

        merge::import_defaults(self, catalog::SSH_AGENT_KEY, catalog::ssh_agent());
        merge::import_defaults(
            self,
            catalog::SSH_AGENT_ADD_KEY_KEY,
            catalog::ssh_key_adder(),
        );
        merge::import_defaults(self, catalog::DNSMASQ_KEY, catalog::dnsmasq(&domain));
        merge::import_defaults(self, catalog::HAPROXY_KEY, catalog::haproxy());
        merge::import_defaults(self, catalog::MAILHOG_KEY, catalog::mailhog());
    }

    /// Fills in the fixed default ports for the two well-known services
    /// when no binding was declared anywhere.
    fn backfill_default_ports(&mut self) {
        for (key, template) in [
            (catalog::HAPROXY_KEY, catalog::haproxy_default_ports()),
            (catalog::MAILHOG_KEY, catalog::mailhog_default_ports()),
        ] {
            if let Some(entry) = self.services.get(key) {
                if entry.port_bindings.is_none() {
                    let merged = merge::merged_service(&template, entry);
                    self.services.insert(key.to_string(), merged);
                }
            }
        }
    }

    /// Seeds the single built-in network when none is configured.
    fn seed_network(&mut self) {
        if self.networks.is_empty() {
            let seeded = merge::merged_network(&catalog::network(), &Network::default());
            self.networks.insert(catalog::NETWORK_KEY.to_string(), seeded);
        }
    }

    /// Resolves every configured volume against the live state of any
    /// pre-existing volume of the same name, then fills gaps. Engine
    /// failures degrade to "no live state".
    async fn resolve_volumes(&mut self, runtime: &dyn ContainerRuntime) {
        let names: Vec<String> = self.volumes.keys().cloned().collect();
        for name in names {
            if let Some(volume) = self.volumes.get_mut(&name) {
                if volume.name.is_empty() {
                    volume.name = name.clone();
                }
            }

            match runtime.volume_get(&name).await {
                Ok(Some(live)) => {
                    if let Some(configured) = self.volumes.get(&name) {
                        let merged = merge::merged_volume(&live, configured);
                        self.volumes.insert(name, merged);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(volume = %name, error = %e, "Could not query live volume state");
                }
            }
        }
    }

    /// Mandatory-field validation: every service needs a non-empty
    /// `pygmy.name` label and a non-empty image.
    pub fn validate(&self) -> Result<()> {
        for (key, service) in &self.services {
            if service.name().is_none() {
                return Err(PygmyError::MissingLabel {
                    service: key.clone(),
                    label: labels::NAME.to_string(),
                });
            }
            if service.image.is_empty() {
                return Err(PygmyError::MissingImage {
                    service: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Replaces each service's image with its override, where one is set.
    fn apply_image_overrides(&mut self) {
        for service in self.services.values_mut() {
            if let Some(image) = &service.image_override {
                if !image.is_empty() {
                    service.image = image.clone();
                }
            }
        }
    }
}
