//! pygmy - local developer-support container manager
//!
//! Entry point for the pygmy application.

use clap::Parser;
use pygmy::cli::{Cli, Commands, ConfigCommands, OutputFormat, UpArgs};
use pygmy::config::{Config, DecodePolicy, Platform};
use pygmy::error::exit_code;
use pygmy::runtime::{ContainerRuntime, ContainerState, DockerCli, NullRuntime};
use pygmy::{catalog, PygmyError};
use std::process::ExitCode;
use tracing::{info, warn, Level};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on CLI flags
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    // Execute the command
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Initialize the tracing subscriber based on CLI options.
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (level_str, _is_quiet) = cli.log_level();

    let level = match level_str {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    Ok(())
}

/// Main application logic.
fn run(cli: Cli) -> pygmy::Result<()> {
    match &cli.command {
        Commands::Up(args) => cmd_up(&cli, args),
        Commands::Down => cmd_down(&cli),
        Commands::Restart(args) => {
            cmd_down(&cli)?;
            cmd_up(&cli, args)
        }
        Commands::Status => cmd_status(&cli),
        Commands::Config(subcmd) => cmd_config(&cli, subcmd),
    }
}

/// Load configuration honoring the decode policy flag.
fn load_config(cli: &Cli) -> pygmy::Result<Config> {
    let policy = if cli.lenient_config {
        DecodePolicy::Lenient
    } else {
        DecodePolicy::Fatal
    };
    Config::load_with_policy(cli.config.as_deref(), policy)
}

/// Creates the tokio runtime driving the engine calls.
fn async_runtime() -> pygmy::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PygmyError::runtime_with_source("Failed to create async runtime", e))
}

/// Name of the network containers attach to, when one is configured.
fn attach_network(config: &Config) -> &str {
    if config.networks.contains_key(catalog::NETWORK_KEY) {
        catalog::NETWORK_KEY
    } else {
        ""
    }
}

/// Handle the `up` command.
fn cmd_up(cli: &Cli, args: &UpArgs) -> pygmy::Result<()> {
    let mut config = load_config(cli)?;
    let runtime = DockerCli::new();

    async_runtime()?.block_on(async {
        config.setup(&runtime, Platform::current()).await?;

        for (name, network) in &config.networks {
            if !runtime.network_exists(name).await? {
                info!(network = %name, "Creating network");
                runtime.network_create(network).await?;
            }
        }

        for volume in config.volumes.values() {
            runtime.volume_create(volume).await?;
        }

        let network = attach_network(&config);
        for key in &config.sorted_services {
            let Some(service) = config.services.get(key) else {
                continue;
            };

            match runtime.container_state(key).await? {
                ContainerState::Running => {
                    info!(service = %key, "Already running");
                    continue;
                }
                ContainerState::Stopped => {
                    runtime.container_remove(key).await?;
                }
                ContainerState::Absent => {}
            }

            info!(service = %key, image = %service.image, "Starting service");
            runtime.container_create(key, service, network).await?;
            runtime.container_start(key).await?;

            if service.output() {
                let logs = runtime.container_logs(key).await?;
                if !logs.trim().is_empty() {
                    println!("{}", logs.trim_end());
                }
            }
        }

        if !args.no_resolver {
            for resolv in &config.resolvers {
                // Needs privileges on the host; failure is not fatal to the
                // containers already running.
                if let Err(e) = resolv.apply() {
                    warn!(file = %resolv.path().display(), error = %e, "Could not write resolver file");
                }
            }
        }

        Ok(())
    })
}

/// Handle the `down` command.
fn cmd_down(cli: &Cli) -> pygmy::Result<()> {
    let mut config = load_config(cli)?;
    let runtime = DockerCli::new();

    async_runtime()?.block_on(async {
        config.setup(&runtime, Platform::current()).await?;

        // Reverse startup order: dependents go down before the agent.
        for key in config.sorted_services.iter().rev() {
            match runtime.container_state(key).await? {
                ContainerState::Absent => {}
                ContainerState::Running => {
                    info!(service = %key, "Stopping service");
                    runtime.container_stop(key).await?;
                    runtime.container_remove(key).await?;
                }
                ContainerState::Stopped => {
                    runtime.container_remove(key).await?;
                }
            }
        }

        Ok(())
    })
}

/// Handle the `status` command.
fn cmd_status(cli: &Cli) -> pygmy::Result<()> {
    let mut config = load_config(cli)?;
    let runtime = DockerCli::new();

    async_runtime()?.block_on(async {
        config.setup(&runtime, Platform::current()).await?;

        println!("Services");
        println!("========");
        for key in &config.sorted_services {
            let state = runtime.container_state(key).await?;
            println!("{}: {}", key, state);
        }

        if !config.resolvers.is_empty() {
            println!("\nResolvers");
            println!("=========");
            for resolv in &config.resolvers {
                println!(
                    "{}: {}",
                    resolv.path().display(),
                    if resolv.applied() { "in place" } else { "missing" }
                );
            }
        }

        // The agent's keys, via the one-shot shower container.
        let agent_state = runtime.container_state(catalog::SSH_AGENT_KEY).await?;
        if agent_state == ContainerState::Running {
            if let Ok(keys) = show_keys(&config, &runtime).await {
                if !keys.trim().is_empty() {
                    println!("\nSSH keys");
                    println!("========");
                    println!("{}", keys.trim_end());
                }
            }
        }

        Ok(())
    })
}

/// Runs the key shower container and returns its output.
async fn show_keys(config: &Config, runtime: &dyn ContainerRuntime) -> pygmy::Result<String> {
    let shower = catalog::ssh_key_shower();
    let name = shower
        .name()
        .unwrap_or_else(|| "amazeeio-ssh-agent-show-keys".to_string());

    // Leftovers from a previous run would collide on the name.
    let _ = runtime.container_remove(&name).await;
    runtime
        .container_create(&name, &shower, attach_network(config))
        .await?;
    runtime.container_start(&name).await?;
    let logs = runtime.container_logs(&name).await?;
    let _ = runtime.container_remove(&name).await;

    Ok(logs)
}

/// Handle the `config` subcommand.
fn cmd_config(cli: &Cli, subcmd: &ConfigCommands) -> pygmy::Result<()> {
    match subcmd {
        ConfigCommands::Validate => match load_config(cli) {
            Ok(mut config) => {
                let result = async_runtime()?
                    .block_on(async { config.setup(&NullRuntime, Platform::current()).await });
                match result {
                    Ok(()) => {
                        println!("✓ Configuration is valid");
                        Ok(())
                    }
                    Err(e) => {
                        println!("✗ Configuration is invalid: {}", e);
                        Err(e)
                    }
                }
            }
            Err(e) => {
                println!("✗ Configuration is invalid: {}", e);
                Err(e)
            }
        },
        ConfigCommands::Show { format } => {
            let mut config = load_config(cli)?;
            async_runtime()?
                .block_on(async { config.setup(&NullRuntime, Platform::current()).await })?;

            let rendered = match format {
                OutputFormat::Yaml => serde_yaml::to_string(&config).map_err(|e| {
                    PygmyError::config_with_source("Failed to serialize configuration", e)
                })?,
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
