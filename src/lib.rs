//! pygmy - local developer-support container manager
//!
//! This crate composes a built-in catalog of dev-tool containers
//! (SSH agent, dnsmasq, haproxy, mailhog) with user configuration into a
//! single merged configuration and a deterministic startup order.
//!
//! # Overview
//!
//! The core is the configuration engine: precedence rules deciding whether
//! a catalog default is applied, overridden or skipped; mandatory-field
//! validation; and the sorter that turns an unordered service map into a
//! weight-and-name-ordered startup sequence with the SSH agent always
//! first. Everything else is either a static catalog template or a direct
//! call into the container engine.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Configuration aggregate, merging, sorting, resolvers
//! - [`catalog`] - Built-in default service descriptors
//! - [`service`] - Service model and label parsing
//! - [`runtime`] - Container engine trait and docker CLI implementation
//! - [`error`] - Error types and exit codes

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;
pub mod service;

// Re-exports for convenience
pub use cli::Cli;
pub use config::{Config, DecodePolicy, Platform};
pub use error::{PygmyError, Result};
pub use runtime::{ContainerRuntime, DockerCli, NullRuntime};
pub use service::Service;
