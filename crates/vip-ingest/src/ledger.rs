//! Append-only audit ledger of ingestion attempts
//!
//! Entries are create-once: this module inserts and reads, never
//! updates or deletes. The most recent entry (by `ingested_at`)
//! defines the "last processed state" consulted by change detection.

use crate::store::Store;
use rusqlite::{params, OptionalExtension};
use tracing::debug;
use vip_common::error::Result;
use vip_common::types::{LedgerEntry, LoadStatus};

/// Digest recorded by the most recent ledger entry, or `None` when the
/// ledger is empty or its table does not exist yet. A missing table is
/// the normal first-load state of a fresh database, not an error.
pub fn last_file_hash(store: &Store) -> Result<Option<String>> {
    let exists: bool = store.conn().query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'ingestion_ledger'",
        [],
        |row| row.get(0),
    )?;
    if !exists {
        debug!("ingestion_ledger table does not exist yet; treating as first load");
        return Ok(None);
    }

    let digest = store
        .conn()
        .query_row(
            "SELECT file_hash FROM ingestion_ledger ORDER BY ingested_at DESC, rowid DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(digest)
}

/// Append one immutable entry to the ledger
pub fn append(store: &Store, entry: &LedgerEntry) -> Result<()> {
    store.conn().execute(
        r#"
        INSERT INTO ingestion_ledger (
            ingestion_id, file_hash, source_path, file_row_count,
            inserted_row_count, load_status, run_id, ingested_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            entry.ingestion_id.to_string(),
            entry.file_hash,
            entry.source_path,
            entry.file_row_count as i64,
            entry.inserted_row_count as i64,
            entry.status.as_str(),
            entry.run_id,
            entry.ingested_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Most recent entries, newest first
pub fn history(store: &Store, limit: u32) -> Result<Vec<LedgerEntry>> {
    let mut stmt = store.conn().prepare(
        r#"
        SELECT ingestion_id, file_hash, source_path, file_row_count,
               inserted_row_count, load_status, run_id, ingested_at
        FROM ingestion_ledger
        ORDER BY ingested_at DESC, rowid DESC
        LIMIT ?1
        "#,
    )?;

    let entries = stmt
        .query_map([limit], |row| {
            let ingestion_id: String = row.get(0)?;
            let ingestion_id = ingestion_id.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

            let status: String = row.get(5)?;
            let status: LoadStatus = status.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

            let ingested_at: String = row.get(7)?;
            let ingested_at = chrono::DateTime::parse_from_rfc3339(&ingested_at)
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        7,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?
                .with_timezone(&chrono::Utc);

            Ok(LedgerEntry {
                ingestion_id,
                file_hash: row.get(1)?,
                source_path: row.get(2)?,
                file_row_count: row.get::<_, i64>(3)? as u64,
                inserted_row_count: row.get::<_, i64>(4)? as u64,
                status,
                run_id: row.get(6)?,
                ingested_at,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// The most recent entry, if any
pub fn last_entry(store: &Store) -> Result<Option<LedgerEntry>> {
    Ok(history(store, 1)?.into_iter().next())
}
