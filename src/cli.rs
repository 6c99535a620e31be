//! Command-line interface definition for pygmy.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pygmy - local developer-support container manager
///
/// Composes the built-in service catalog with your configuration and
/// starts the ssh-agent, dnsmasq, haproxy and mailhog containers in a
/// deterministic order.
#[derive(Debug, Parser)]
#[command(name = "pygmy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (default: ~/.pygmy.yml)
    #[arg(short, long, global = true, env = "PYGMY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Continue with built-in defaults when the config file fails to parse
    #[arg(long, global = true)]
    pub lenient_config: bool,

    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the effective log level based on verbose/quiet flags.
    /// Returns: (level_name, is_quiet)
    pub fn log_level(&self) -> (&'static str, bool) {
        if self.quiet {
            return ("error", true);
        }

        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };

        (level, false)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start all pygmy containers in startup order
    Up(UpArgs),

    /// Stop and remove all pygmy containers
    Down,

    /// Stop, remove and start all pygmy containers again
    Restart(UpArgs),

    /// Show the state of the pygmy containers and resolver files
    Status,

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `up` and `restart` subcommands.
#[derive(Debug, Args)]
pub struct UpArgs {
    /// Do not write host resolver files
    #[arg(long)]
    pub no_resolver: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show the effective configuration after defaulting
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML output.
    Yaml,
    /// JSON output.
    Json,
}
