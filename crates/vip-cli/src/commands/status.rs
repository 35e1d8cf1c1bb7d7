//! `vip status` command implementation
//!
//! Shows the last known ingestion state: the ledger entry change
//! detection would compare against on the next run.

use crate::commands::{short_hash, status_label};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vip_ingest::{ledger, Store};

/// Print the most recent ledger entry and raw-table size
pub fn run(db: &Path) -> Result<()> {
    if !db.exists() {
        println!("No ingestion recorded: database not found at {}", db.display());
        return Ok(());
    }

    let store = Store::open(db)?;
    store.ensure_schema()?;

    let Some(entry) = ledger::last_entry(&store)? else {
        println!("No ingestion recorded yet.");
        return Ok(());
    };

    println!("{}", "Last Ingestion:".cyan().bold());
    println!("  Status:    {}", status_label(entry.status));
    println!("  When:      {}", entry.ingested_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  File hash: {}", short_hash(&entry.file_hash));
    println!("  Source:    {}", entry.source_path);
    println!(
        "  Rows:      {} in file, {} inserted",
        entry.file_row_count, entry.inserted_row_count
    );
    println!();
    println!("Raw table: {} voters total", store.raw_row_count()?);

    Ok(())
}
