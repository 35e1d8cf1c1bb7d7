//! Ingestion orchestrator: fingerprint, detect, load, record
//!
//! Sequences one full run: `Start -> Fingerprinted -> {Skipped |
//! Loading} -> Recorded -> Done`, with failure terminal at any step
//! before the ledger write. A failed run writes no ledger entry, so the
//! next attempt starts from the same last-known state. A skipped run
//! still writes a `no-op` entry, keeping the audit history complete for
//! every invocation.
//!
//! The caller (an external scheduler) enforces at-most-one concurrent
//! run per store; nothing here locks or coordinates.

use crate::store::Store;
use crate::{detect, ledger, loader};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;
use vip_common::error::Result;
use vip_common::fingerprint::fingerprint_file;
use vip_common::types::{Fingerprint, LedgerEntry, LoadStatus};

/// Terminal state of a completed run, for the scheduler to inspect
#[derive(Debug, Clone)]
pub struct IngestionReport {
    /// Id of the ledger entry this run recorded
    pub ingestion_id: Uuid,

    /// `Success` when rows were inserted, `NoOp` otherwise
    pub status: LoadStatus,

    /// Fingerprint of the source file as observed by this run
    pub fingerprint: Fingerprint,

    /// Rows appended to the raw table by this run's file hash
    pub inserted_row_count: u64,

    /// True when the file hash was unchanged and the load was skipped
    pub skipped: bool,
}

/// Run the full ingestion pipeline once against `store`.
///
/// `run_id` is the external scheduler's run identity, recorded verbatim
/// in the ledger. On success the store holds one new ledger entry; on
/// error neither table has been mutated by this run (a loader failure
/// rolls back, and no ledger entry is written for a failed attempt).
pub fn run(store: &mut Store, csv_path: &Path, run_id: Option<&str>) -> Result<IngestionReport> {
    // Fingerprinting is a pure pre-condition: a missing or unreadable
    // file aborts before any mutation.
    let fingerprint = fingerprint_file(csv_path)?;
    info!(
        path = %csv_path.display(),
        file_hash = %fingerprint.digest,
        rows = fingerprint.row_count,
        "Fingerprinted source file"
    );

    store.ensure_schema()?;
    let last_hash = ledger::last_file_hash(store)?;

    let (inserted_row_count, skipped) =
        if detect::is_new_data(&fingerprint.digest, last_hash.as_deref()) {
            info!(last_hash = ?last_hash, "New data detected; loading");
            let loaded = loader::load(store, csv_path, &fingerprint)?;

            // Write-time invariant: the recorded count must equal the raw
            // rows tagged with this hash. After a run that crashed between
            // raw insert and ledger append, the two can disagree; the raw
            // table is the truth and recording it heals the ledger.
            let recorded = store.rows_with_file_hash(&fingerprint.digest)?;
            if recorded != loaded {
                warn!(
                    loaded,
                    recorded,
                    file_hash = %fingerprint.digest,
                    "Loader count disagrees with raw table; recording raw-table count"
                );
            }
            (recorded, false)
        } else {
            info!(
                file_hash = %fingerprint.digest,
                "File hash already processed; skipping load"
            );
            (0, true)
        };

    let status = if inserted_row_count > 0 {
        LoadStatus::Success
    } else {
        LoadStatus::NoOp
    };

    let entry = LedgerEntry::new(&fingerprint, csv_path, inserted_row_count, status, run_id);
    ledger::append(store, &entry)?;
    info!(
        ingestion_id = %entry.ingestion_id,
        status = %status,
        inserted_row_count,
        "Recorded ingestion"
    );

    Ok(IngestionReport {
        ingestion_id: entry.ingestion_id,
        status,
        fingerprint,
        inserted_row_count,
        skipped,
    })
}
