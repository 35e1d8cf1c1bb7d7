//! VIP CLI Library
//!
//! Command-line interface for the voter ingestion pipeline. This is the
//! surface an external scheduler invokes:
//!
//! - **Ingestion**: run the pipeline once (`vip ingest`)
//! - **Inspection**: read the audit ledger (`vip history`, `vip status`)
//! - **Setup**: create the schema without ingesting (`vip init-db`)
//!
//! The scheduler owns retry policy and at-most-one-concurrent-run; the
//! CLI just executes a single run and exits zero on `Done`, non-zero on
//! failure.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// VIP - incremental voter CSV ingestion
#[derive(Parser, Debug)]
#[command(name = "vip")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the ingestion pipeline once against the store
    Ingest {
        /// Source voter CSV file
        #[arg(long, env = "VIP_CSV_PATH")]
        csv: PathBuf,

        /// SQLite database file (created if absent)
        #[arg(long, env = "VIP_DB_PATH")]
        db: PathBuf,

        /// Scheduler run identity recorded in the ledger
        #[arg(long, env = "VIP_RUN_ID")]
        run_id: Option<String>,
    },

    /// Show recent ledger entries, newest first
    History {
        /// SQLite database file
        #[arg(long, env = "VIP_DB_PATH")]
        db: PathBuf,

        /// Maximum number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show the last known ingestion state
    Status {
        /// SQLite database file
        #[arg(long, env = "VIP_DB_PATH")]
        db: PathBuf,
    },

    /// Create the raw and ledger tables without ingesting
    InitDb {
        /// SQLite database file
        #[arg(long, env = "VIP_DB_PATH")]
        db: PathBuf,
    },
}
