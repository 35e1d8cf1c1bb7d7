//! `vip init-db` command implementation

use anyhow::Result;
use std::path::Path;
use vip_ingest::Store;

/// Create the raw and ledger tables without ingesting anything
pub fn run(db: &Path) -> Result<()> {
    let store = Store::open(db)?;
    store.ensure_schema()?;
    println!("Initialized schema at {}", db.display());
    Ok(())
}
