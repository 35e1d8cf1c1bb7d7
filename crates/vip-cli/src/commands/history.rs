//! `vip history` command implementation
//!
//! Read-only view over the audit ledger, newest first.

use crate::commands::{short_hash, status_label};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use vip_ingest::{ledger, Store};

/// Print the most recent `limit` ledger entries
pub fn run(db: &Path, limit: u32) -> Result<()> {
    if !db.exists() {
        println!("No ingestion history: database not found at {}", db.display());
        return Ok(());
    }

    let store = Store::open(db)?;
    store.ensure_schema()?;
    let entries = ledger::history(&store, limit)?;

    if entries.is_empty() {
        println!("No ingestion history recorded yet.");
        println!("Run 'vip ingest' to load the source file.");
        return Ok(());
    }

    println!("{}", "Ingestion History:".cyan().bold());
    println!();

    for entry in &entries {
        println!(
            "{}  {}",
            entry.ingested_at.format("%Y-%m-%d %H:%M:%S UTC"),
            status_label(entry.status)
        );
        println!("  Ingestion: {}", entry.ingestion_id);
        println!("  File hash: {}", short_hash(&entry.file_hash));
        println!("  Source:    {}", entry.source_path);
        println!(
            "  Rows:      {} in file, {} inserted",
            entry.file_row_count, entry.inserted_row_count
        );
        if let Some(ref run_id) = entry.run_id {
            println!("  Run:       {run_id}");
        }
        println!();
    }

    println!("Showing {} of most recent entries.", entries.len());
    Ok(())
}
