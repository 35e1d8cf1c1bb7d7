//! Common types used across VIP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Content identity of a source file: a SHA-256 digest over the whole
/// file plus a cheap data-row estimate (header excluded).
///
/// Recomputed on every run; two files with identical bytes always
/// produce identical fingerprints, which is the sole anchor for change
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// 64-character lowercase hex SHA-256 digest of the file contents
    pub digest: String,

    /// Number of data rows (newline-delimited records minus the header)
    pub row_count: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} rows)", &self.digest[..16.min(self.digest.len())], self.row_count)
    }
}

/// Outcome of an ingestion attempt as recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    /// New rows were inserted into the raw table
    Success,
    /// Nothing to do: unchanged file, or changed file with no new ids
    NoOp,
    /// Load attempt failed (never persisted by the orchestrator; kept
    /// for consumers that record failures out of band)
    Failed,
}

impl LoadStatus {
    /// Stable string form used in the ledger table
    pub fn as_str(&self) -> &str {
        match self {
            LoadStatus::Success => "success",
            LoadStatus::NoOp => "no-op",
            LoadStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadStatus {
    type Err = crate::error::VipError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "success" => Ok(LoadStatus::Success),
            "no-op" => Ok(LoadStatus::NoOp),
            "failed" => Ok(LoadStatus::Failed),
            other => Err(crate::error::VipError::MalformedInput(format!(
                "unknown load status: {other}"
            ))),
        }
    }
}

/// One immutable record of an ingestion attempt.
///
/// Entries are append-only and ordered by `ingested_at`; the most
/// recent entry defines the "last processed state" for change
/// detection. An entry's `inserted_row_count` must equal the number of
/// raw rows tagged with its `file_hash`, checked at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique id of this ingestion attempt
    pub ingestion_id: Uuid,

    /// SHA-256 digest of the source file at the time of this attempt
    pub file_hash: String,

    /// Path the source file was read from
    pub source_path: String,

    /// Data rows observed in the source file (freshly computed, also on skips)
    pub file_row_count: u64,

    /// Rows actually appended to the raw table by this attempt
    pub inserted_row_count: u64,

    /// Outcome of the attempt
    pub status: LoadStatus,

    /// Run identity supplied by the external scheduler, if any
    pub run_id: Option<String>,

    /// Wall-clock time the entry was recorded
    pub ingested_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create a new ledger entry stamped with a fresh id and the current time
    pub fn new(
        fingerprint: &Fingerprint,
        source_path: &Path,
        inserted_row_count: u64,
        status: LoadStatus,
        run_id: Option<&str>,
    ) -> Self {
        Self {
            ingestion_id: Uuid::new_v4(),
            file_hash: fingerprint.digest.clone(),
            source_path: source_path.display().to_string(),
            file_row_count: fingerprint.row_count,
            inserted_row_count,
            status,
            run_id: run_id.map(str::to_string),
            ingested_at: Utc::now(),
        }
    }
}
