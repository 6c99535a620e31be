//! Built-in service catalog.
//!
//! One constructor per bundled dev-tool container, each a static template
//! producing the default [`Service`](crate::service::Service) descriptor
//! with its fixed label set. Catalog entries request import through the
//! field-level `defaults` flag; they deliberately carry no `pygmy.defaults`
//! label, which would leak into merged user entries and turn later
//! fill-gaps merges into full overwrites.

mod dnsmasq;
mod haproxy;
mod mailhog;
mod network;
mod ssh_agent;
mod ssh_key;

pub use dnsmasq::dnsmasq;
pub use haproxy::{haproxy, haproxy_default_ports};
pub use mailhog::{mailhog, mailhog_default_ports};
pub use network::network;
pub use ssh_agent::ssh_agent;
pub use ssh_key::{ssh_key_adder, ssh_key_shower};

/// Fixed catalog slot for the SSH agent.
pub const SSH_AGENT_KEY: &str = "amazeeio-ssh-agent";
/// Fixed catalog slot for the one-shot key adder.
pub const SSH_AGENT_ADD_KEY_KEY: &str = "amazeeio-ssh-agent-add-key";
/// Fixed catalog slot for the DNS resolver.
pub const DNSMASQ_KEY: &str = "amazeeio-dnsmasq";
/// Fixed catalog slot for the reverse proxy.
pub const HAPROXY_KEY: &str = "amazeeio-haproxy";
/// Fixed catalog slot for the mail sink.
pub const MAILHOG_KEY: &str = "amazeeio-mailhog";
/// Name of the single built-in network.
pub const NETWORK_KEY: &str = "amazeeio-network";
