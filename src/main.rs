//! CLI entry point for clarity.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;
mod progress;

use app_config::{EffectiveConfig, VerbositySetting, load_config};
use cli::{Cli, Command, ConfigCommand};

/// Tracing filter from CLI flags, falling back to the config file's verbosity.
///
/// Priority: quiet flag > verbose flag > config verbosity > info.
/// `RUST_LOG` overrides all of these in [`init_tracing`].
fn default_log_level(quiet: bool, verbose: u8, configured: VerbositySetting) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => configured.filter(),
        1 => "debug",
        _ => "trace",
    }
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref())?;
    let effective = EffectiveConfig::from_file(&loaded.file_config());

    init_tracing(default_log_level(cli.quiet, cli.verbose, effective.verbosity));
    debug!(?cli, ?effective, "CLI arguments and config resolved");

    match &cli.command {
        Command::Summarize(args) => {
            info!("clarity starting");
            commands::run_summarize_command(args, &effective, cli.quiet).await?;
        }
        Command::Local(args) => commands::run_local_command(args, &effective)?,
        Command::History { command } => commands::run_history_command(command, &effective).await?,
        Command::Theme { command } => commands::run_theme_command(*command, &effective).await?,
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::run_config_show_command(&loaded, &effective)?,
        },
    }

    Ok(())
}
