//! VIP CLI - Main entry point

use clap::Parser;
use std::process;
use tracing::error;
use vip_cli::{commands, Cli, Commands};
use vip_common::logging::{init_logging, LogConfig, LogLevel};

fn main() {
    // Load a local .env before argument parsing so env-backed args see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Verbose mode logs debug to console; otherwise only warnings and up
    let log_config = if cli.verbose {
        LogConfig::with_level(LogLevel::Debug)
    } else {
        LogConfig::with_level(LogLevel::Warn)
    };

    // Environment variables take precedence over flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI should still work if logging cannot be initialized
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Execute the parsed CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Ingest { csv, db, run_id } => {
            commands::ingest::run(csv, db, run_id.as_deref())
        },
        Commands::History { db, limit } => commands::history::run(db, *limit),
        Commands::Status { db } => commands::status::run(db),
        Commands::InitDb { db } => commands::init_db::run(db),
    }
}
