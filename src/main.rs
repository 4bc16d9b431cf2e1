//! Lumnia CLI - Mixing Studio Console Simulator
//!
//! Command-line interface for the Lumnia console model.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use lumnia::cli::{commands, Cli, Commands};
use lumnia::StudioConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = StudioConfig::load_or_default(cli.config.as_deref())
        .context("failed to load studio config")?;

    // Initialize logger
    let default_filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Lumnia Studio v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd, &config),
        None => {
            println!("Lumnia Studio v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: &StudioConfig) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::State => commands::print_state(config),
        Commands::Effects => commands::list_effects(),
        Commands::Analyze {
            track,
            file,
            realtime,
        } => commands::analyze(config, &track, &file, realtime),
        Commands::Session {
            add_tracks,
            select,
            mastering,
            analyze_all,
        } => commands::session(config, add_tracks, select.as_deref(), mastering, analyze_all),
        Commands::Export { realtime } => commands::export(config, realtime),
    };

    if let Err(e) = &result {
        if let Some(hint) = e.recovery_suggestion() {
            eprintln!("hint: {}", hint);
        }
    }
    Ok(result?)
}
