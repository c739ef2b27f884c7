//! Treeseal CLI Binary
//!
//! Command-line interface for the Treeseal audit pipeline.

use anyhow::Context;
use clap::Parser;
use std::process;
use tracing::{error, info};
use treeseal::cli::{map_error, Cli, Commands, RunContext};
use treeseal::config::SealConfig;
use treeseal::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Treeseal CLI starting");

    let context = RunContext::new(cli.config.clone());

    match context.execute(&cli.command) {
        Ok(outcome) => {
            info!(success = outcome.success, "Command completed");
            println!("{}", outcome.output);
            if !outcome.success {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config
/// file. Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = load_config_for_logging(cli)
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.level = "off".to_string();
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}

fn load_config_for_logging(cli: &Cli) -> Option<SealConfig> {
    if let Some(ref path) = cli.config {
        return SealConfig::load_from_file(path)
            .context("loading explicit config")
            .ok();
    }
    let target = match &cli.command {
        Commands::Audit { target, .. }
        | Commands::Verify { target, .. }
        | Commands::Report { target, .. } => Some(target),
        Commands::Discover { .. } => None,
    };
    target.and_then(|t| SealConfig::load(t).ok())
}
