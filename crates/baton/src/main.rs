// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baton - schedules conductor evaluation surveys from musician rosters.
//!
//! This is the binary entry point. One invocation is one reconciliation pass;
//! run it from cron or a CI scheduler.

mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use baton_config::{BatonConfig, ConfigError};
use clap::{Parser, Subcommand};
use tracing::error;

/// Baton - schedules conductor evaluation surveys from musician rosters.
#[derive(Parser, Debug)]
#[command(name = "baton", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Reconcile every pending roster once (the default).
    Run,
    /// Load and validate configuration, then exit.
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            baton_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            println!("baton: configuration is valid");
            ExitCode::SUCCESS
        }
        Commands::Run => {
            init_tracing(&config.run.log_level);
            match run::run_once(&config).await {
                Ok(summary) => {
                    println!("{}", run::render_summary(&summary));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(error = %e, "reconciliation pass aborted");
                    eprintln!("baton: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<BatonConfig, Vec<ConfigError>> {
    match path {
        Some(path) => baton_config::load_and_validate_path(path),
        None => baton_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("baton={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::try_parse_from(["baton"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["baton", "check", "--config", "/tmp/baton.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/baton.toml")));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["baton", "serve"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
