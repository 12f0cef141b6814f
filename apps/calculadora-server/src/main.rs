mod config;
mod cors;
mod logging;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Calculadora Server - arithmetic endpoints and named registers over HTTP
#[derive(Parser)]
#[command(name = "calculadora-server")]
#[command(about = "Calculadora Server - arithmetic endpoints and named registers over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config and environment)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);

    logging::init_logging(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            tracing::info!(
                mode = %config.server.mode,
                port = config.server.effective_port(),
                "Calculadora Server starting"
            );
            server::run(config).await
        }
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.server.bind_addr()?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}
