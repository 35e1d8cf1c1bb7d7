//! VIP Ingestion Engine
//!
//! Incremental, idempotent loads from an append-only voter CSV into an
//! embedded SQLite store, exactly once per distinct file content, with
//! an append-only ledger auditing every attempt.
//!
//! Each run:
//!
//! 1. Fingerprints the CSV (streaming SHA-256 + quick row count).
//! 2. Ensures the raw + ledger tables exist.
//! 3. Branches on whether the file hash changed since the last entry.
//! 4. Loads only rows whose `id` is new, via a staged anti-join merge.
//! 5. Appends one ledger entry recording the outcome.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vip_ingest::{orchestrator, store::Store};
//!
//! fn main() -> vip_common::Result<()> {
//!     let mut store = Store::open("goodparty.db")?;
//!     let report = orchestrator::run(&mut store, Path::new("voters.csv"), None)?;
//!     println!("{}: {} rows", report.status, report.inserted_row_count);
//!     Ok(())
//! }
//! ```

pub mod detect;
pub mod ledger;
pub mod loader;
pub mod orchestrator;
pub mod record;
pub mod store;

// Re-export commonly used types
pub use orchestrator::IngestionReport;
pub use store::Store;
