//! Incremental loader: staged anti-join insert into the raw table
//!
//! The merge is insert-only, never an upsert: a staged row whose `id`
//! already exists in the raw table is discarded, and existing rows are
//! never updated. Re-running against content that is already fully
//! loaded inserts nothing and leaves the raw table unchanged.

use crate::record;
use crate::store::Store;
use chrono::Utc;
use rusqlite::params;
use std::path::Path;
use tracing::{debug, info};
use vip_common::error::{Result, VipError};
use vip_common::types::Fingerprint;

/// Load new rows from the CSV at `path` into the raw table.
///
/// All rows are staged first (so a malformed file fails before any
/// write), then a single transaction materializes the staged set and
/// appends the anti-join difference to `raw_voters`, each row tagged
/// with `fingerprint.digest` and one shared load timestamp. Returns the
/// number of rows actually inserted; zero is a valid outcome (e.g. a
/// changed file containing only already-seen ids).
pub fn load(store: &mut Store, path: &Path, fingerprint: &Fingerprint) -> Result<u64> {
    let staged = record::stage_records(path)?;
    let load_timestamp = Utc::now().to_rfc3339();

    let tx = store
        .conn_mut()
        .transaction()
        .map_err(|e| VipError::FailedLoad(format!("could not begin load transaction: {e}")))?;

    tx.execute_batch(
        r#"
        CREATE TEMP TABLE staged_voters (
            id INTEGER NOT NULL,
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
            load_timestamp TEXT NOT NULL,
            source_file_hash TEXT NOT NULL
        )
        "#,
    )?;

    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO staged_voters (
                id, first_name, last_name, age, gender, state, party, email,
                registered_date, last_voted_date, updated_at,
                load_timestamp, source_file_hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )?;

        for voter in &staged {
            stmt.execute(params![
                voter.id,
                voter.first_name,
                voter.last_name,
                voter.age,
                voter.gender,
                voter.state,
                voter.party,
                voter.email,
                voter.registered_date,
                voter.last_voted_date,
                voter.updated_at,
                load_timestamp,
                fingerprint.digest,
            ])?;
        }
    }

    // Set difference by primary key: only ids absent from the raw table
    let inserted = tx.execute(
        r#"
        INSERT INTO raw_voters (
            id, first_name, last_name, age, gender, state, party, email,
            registered_date, last_voted_date, updated_at,
            load_timestamp, source_file_hash
        )
        SELECT s.id, s.first_name, s.last_name, s.age, s.gender, s.state,
               s.party, s.email, s.registered_date, s.last_voted_date,
               s.updated_at, s.load_timestamp, s.source_file_hash
        FROM staged_voters s
        WHERE NOT EXISTS (
            SELECT 1 FROM raw_voters r WHERE r.id = s.id
        )
        "#,
        [],
    )?;

    tx.execute_batch("DROP TABLE staged_voters")?;
    tx.commit()
        .map_err(|e| VipError::FailedLoad(format!("load transaction commit failed: {e}")))?;

    debug!(staged = staged.len(), inserted, "Anti-join merge complete");
    info!(
        inserted,
        path = %path.display(),
        file_hash = %fingerprint.digest,
        "Loaded new voter rows"
    );
    Ok(inserted as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,first_name,last_name,age,gender,state,party,email,registered_date,last_voted_date,updated_at";

    fn write_csv(dir: &tempfile::TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    fn row(id: i64) -> String {
        format!(
            "{id},First{id},Last{id},40,F,CA,Independent,voter{id}@example.com,2016-05-12,,2025-01-15T08:00:00Z"
        )
    }

    fn fingerprint(digest: &str) -> Fingerprint {
        Fingerprint {
            digest: digest.to_string(),
            row_count: 0,
        }
    }

    #[test]
    fn test_load_inserts_all_rows_first_time() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(&dir, "voters.csv", &[&row(1), &row(2), &row(3)]);
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        let inserted = load(&mut store, &csv, &fingerprint("hash-a")).unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(store.raw_row_count().unwrap(), 3);
        assert_eq!(store.rows_with_file_hash("hash-a").unwrap(), 3);
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(&dir, "voters.csv", &[&row(1), &row(2)]);
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        assert_eq!(load(&mut store, &csv, &fingerprint("hash-a")).unwrap(), 2);
        assert_eq!(load(&mut store, &csv, &fingerprint("hash-a")).unwrap(), 0);
        assert_eq!(store.raw_row_count().unwrap(), 2);
        // No re-tagging: existing rows keep their original provenance
        assert_eq!(store.rows_with_file_hash("hash-a").unwrap(), 2);
    }

    #[test]
    fn test_load_superset_inserts_only_new_ids() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_csv(&dir, "v1.csv", &[&row(1), &row(2)]);
        let second = write_csv(&dir, "v2.csv", &[&row(1), &row(2), &row(3)]);
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        load(&mut store, &first, &fingerprint("hash-a")).unwrap();
        let inserted = load(&mut store, &second, &fingerprint("hash-b")).unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(store.raw_row_count().unwrap(), 3);
        assert_eq!(store.rows_with_file_hash("hash-b").unwrap(), 1);
    }

    #[test]
    fn test_load_never_updates_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_csv(&dir, "v1.csv", &[&row(1)]);
        // Same id, different contents
        let second = write_csv(
            &dir,
            "v2.csv",
            &["1,Changed,Name,99,M,NY,Democrat,new@example.com,2020-01-01,,2025-06-01T00:00:00Z"],
        );
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        load(&mut store, &first, &fingerprint("hash-a")).unwrap();
        assert_eq!(load(&mut store, &second, &fingerprint("hash-b")).unwrap(), 0);

        let first_name: String = store
            .conn()
            .query_row("SELECT first_name FROM raw_voters WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(first_name, "First1");
    }

    #[test]
    fn test_malformed_file_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(&dir, "bad.csv", &[&row(1), "2,broken"]);
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        let err = load(&mut store, &csv, &fingerprint("hash-a")).unwrap_err();
        assert!(matches!(err, VipError::MalformedInput(_)));
        assert_eq!(store.raw_row_count().unwrap(), 0);
    }

    #[test]
    fn test_load_can_run_twice_on_same_connection() {
        // The temp staging table must not collide across runs
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(&dir, "voters.csv", &[&row(1)]);
        let mut store = Store::in_memory().unwrap();
        store.ensure_schema().unwrap();

        load(&mut store, &csv, &fingerprint("hash-a")).unwrap();
        load(&mut store, &csv, &fingerprint("hash-a")).unwrap();
    }
}
