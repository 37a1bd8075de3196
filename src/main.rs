//! aossession - ArubaOS 8 REST session client
//!
//! CLI entry point that dispatches to subcommands.

use aossession::cli::{commands, Cli, Commands};
use aossession::config::ConfigManager;
use aossession::error::AosResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> AosResult<()> {
    let cli = Cli::parse();

    // Layering: defaults < config file < AOS_* environment < flags
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = manager.load_with_env()?;
    cli.connection.apply(&mut config);

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config file {}", manager.path().display());

    match cli.command {
        Commands::Login(args) => commands::login(args, &config),
        Commands::Logout => commands::logout(&config),
        Commands::Show(args) => commands::show(args, &config),
        Commands::Get(args) => commands::get(args, &config),
        Commands::Post(args) => commands::post(args, &config),
        Commands::Put(args) => commands::put(args, &config),
        Commands::Write => commands::write(&config),
        Commands::Cache(args) => commands::cache(args, &config),
        Commands::Config(args) => commands::config(args, &manager, &config),
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr so stdout stays JSON
fn init_logging(verbose: u8, log_format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("aossession=warn"),
        1 => EnvFilter::new("aossession=info"),
        _ => EnvFilter::new("aossession=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
