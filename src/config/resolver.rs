//! Host DNS resolver descriptors.
//!
//! One descriptor per platform-specific resolver file. The set attached to
//! the aggregate is chosen exactly once, at defaulting time, from the host
//! OS; it is never re-derived per service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Port the dnsmasq container answers on.
const DNS_PORT: u16 = 6053;

/// Header prepended to every generated resolver file.
const GENERATED_HEADER: &str = "# Generated by amazeeio pygmy\n";

/// Host operating system, as far as resolver selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS: `/etc/resolver` drop-in.
    MacOs,
    /// Linux: systemd-resolved drop-in.
    Linux,
    /// Anything else: no resolver files.
    Unsupported,
}

impl Platform {
    /// Detects the platform this process runs on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Unsupported,
        }
    }
}

/// A platform-specific DNS resolver file descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolv {
    /// Human-readable descriptor name.
    pub name: String,
    /// File content to write.
    pub data: String,
    /// File name within `folder`.
    pub file: String,
    /// Directory the file lives in.
    pub folder: String,
    /// Whether this resolver should be written at all.
    pub enabled: bool,
}

impl Resolv {
    /// The macOS resolver drop-in for a domain.
    pub fn macos(domain: &str) -> Self {
        Self {
            name: "MacOS Resolver".to_string(),
            data: format!(
                "{}nameserver 127.0.0.1\ndomain {}\nport {}\n",
                GENERATED_HEADER, domain, DNS_PORT
            ),
            file: domain.to_string(),
            folder: "/etc/resolver".to_string(),
            enabled: true,
        }
    }

    /// The systemd-resolved drop-in for a domain.
    pub fn linux(domain: &str) -> Self {
        Self {
            name: "Linux Resolver".to_string(),
            data: format!(
                "{}[Resolve]\nDNS=127.0.0.1:{}\nDomains={}\n",
                GENERATED_HEADER, DNS_PORT, domain
            ),
            file: format!("{}.conf", domain),
            folder: "/usr/lib/systemd/resolved.conf.d".to_string(),
            enabled: true,
        }
    }

    /// Full target path of the resolver file.
    pub fn path(&self) -> PathBuf {
        Path::new(&self.folder).join(&self.file)
    }

    /// Whether the file already exists with the expected content.
    pub fn applied(&self) -> bool {
        std::fs::read_to_string(self.path())
            .map(|content| content == self.data)
            .unwrap_or(false)
    }

    /// Writes the resolver file, creating the directory when needed.
    ///
    /// Disabled descriptors are skipped silently.
    pub fn apply(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        std::fs::create_dir_all(&self.folder)?;
        std::fs::write(self.path(), &self.data)?;
        Ok(())
    }

    /// Removes the resolver file when present.
    pub fn remove(&self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The resolver set for a platform, chosen once at defaulting time.
pub fn default_resolvers(platform: Platform, domain: &str) -> Vec<Resolv> {
    match platform {
        Platform::MacOs => vec![Resolv::macos(domain)],
        Platform::Linux => vec![Resolv::linux(domain)],
        Platform::Unsupported => Vec::new(),
    }
}
