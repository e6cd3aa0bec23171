//! # mcr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mcr_cli::actions::{run_actions, ActionsArgs};
use mcr_cli::config::Config;
use mcr_cli::contract::{run_contract, ContractArgs};
use mcr_cli::migrate::{run_migrate, MigrateArgs};

/// MC-Review core tools.
///
/// Upgrades stored submission payloads, answers action-gating questions,
/// and sends contract lifecycle requests to the review API.
#[derive(Parser, Debug)]
#[command(name = "mcr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to the YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upgrade a stored payload to the current proto version.
    Migrate(MigrateArgs),

    /// List the actions a role may take on a package in a given status.
    Actions(ActionsArgs),

    /// Show a contract or request a lifecycle transition.
    Contract(ContractArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = Config::load(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Migrate(args) => run_migrate(args),
        Commands::Actions(args) => run_actions(args, &config),
        Commands::Contract(args) => run_contract(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
