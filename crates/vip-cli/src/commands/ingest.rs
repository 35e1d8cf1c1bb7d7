//! `vip ingest` command implementation
//!
//! Runs the full pipeline once and prints the terminal state for the
//! invoking scheduler.

use crate::commands::{short_hash, status_label};
use anyhow::Result;
use std::path::Path;
use vip_ingest::{orchestrator, Store};

/// Run one ingestion against the store at `db`
pub fn run(csv: &Path, db: &Path, run_id: Option<&str>) -> Result<()> {
    let mut store = Store::open(db)?;
    let report = orchestrator::run(&mut store, csv, run_id)?;

    println!("Ingestion complete.");
    println!("  Status:     {}", status_label(report.status));
    println!("  Ingestion:  {}", report.ingestion_id);
    println!("  File hash:  {}", short_hash(&report.fingerprint.digest));
    println!("  File rows:  {}", report.fingerprint.row_count);
    println!("  Inserted:   {}", report.inserted_row_count);
    if report.skipped {
        println!("  (file hash unchanged; load skipped)");
    }

    Ok(())
}
