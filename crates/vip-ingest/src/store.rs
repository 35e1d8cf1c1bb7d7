//! Store client and SQLite schema for the raw table and ledger
//!
//! A [`Store`] owns one `rusqlite` connection for the duration of a
//! run. It is constructed explicitly by the caller and dropped at run
//! end; there is no process-wide cached handle.

use rusqlite::Connection;
use std::path::Path;
use vip_common::error::{Result, VipError};

/// Client for the embedded analytical store.
///
/// The store holds two decoupled tables: `raw_voters` (canonical,
/// insert-only domain rows) and `ingestion_ledger` (append-only audit
/// trail). Both are created lazily by [`Store::ensure_schema`].
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`.
    ///
    /// Parent directories are created if needed. A database that cannot
    /// be opened (locked, unreadable) surfaces as
    /// [`VipError::StoreUnavailable`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            VipError::StoreUnavailable(format!("could not open {}: {e}", path.display()))
        })?;

        Ok(Self { conn })
    }

    /// Open an in-memory store (tests)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| VipError::StoreUnavailable(format!("in-memory open failed: {e}")))?;
        Ok(Self { conn })
    }

    /// Idempotently create the raw table, the ledger table, and their
    /// indexes. Safe to call on every run; creating an already-existing
    /// table is a no-op.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS raw_voters (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                state TEXT NOT NULL,
                party TEXT NOT NULL,
                email TEXT NOT NULL,
                registered_date TEXT NOT NULL,
                last_voted_date TEXT,
                updated_at TEXT NOT NULL,

                -- Provenance
                load_timestamp TEXT NOT NULL,
                source_file_hash TEXT NOT NULL
            )
            "#,
            [],
        )?;

        self.conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS ingestion_ledger (
                ingestion_id TEXT PRIMARY KEY,
                file_hash TEXT NOT NULL,
                source_path TEXT NOT NULL,
                file_row_count INTEGER NOT NULL,
                inserted_row_count INTEGER NOT NULL,
                load_status TEXT NOT NULL,
                run_id TEXT,
                ingested_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_ledger_ingested_at ON ingestion_ledger(ingested_at)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_raw_voters_file_hash ON raw_voters(source_file_hash)",
            [],
        )?;

        Ok(())
    }

    /// Total rows in the raw table
    pub fn raw_row_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM raw_voters", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Rows in the raw table tagged with the given source file hash.
    ///
    /// Backs the write-time ledger invariant: an entry's
    /// `inserted_row_count` must equal this count for its hash.
    pub fn rows_with_file_hash(&self, digest: &str) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM raw_voters WHERE source_file_hash = ?1",
            [digest],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_creates_tables() {
        let store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        let mut stmt = store
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"raw_voters".to_string()));
        assert!(tables.contains(&"ingestion_ledger".to_string()));
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();
        // Second invocation must be a no-op, not an error
        assert!(store.ensure_schema().is_ok());
    }

    #[test]
    fn test_counts_on_empty_store() {
        let store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.raw_row_count().unwrap(), 0);
        assert_eq!(store.rows_with_file_hash("deadbeef").unwrap(), 0);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("voters.db");
        let store = Store::open(&db_path).unwrap();
        store.ensure_schema().unwrap();
        assert!(db_path.exists());
    }
}
