//! Voter domain rows and CSV staging
//!
//! Staging parses the entire source file into memory before the store
//! is touched: a malformed row anywhere in the file fails the whole
//! call, so no partial rows can ever reach the raw table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use vip_common::error::{Result, VipError};

/// One domain row of the source voter CSV.
///
/// Field order matches the source header; provenance columns
/// (`load_timestamp`, `source_file_hash`) are attached by the loader,
/// not carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterRecord {
    /// Source-defined identifier; unique across all time in the raw table
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
    pub state: String,
    pub party: String,
    pub email: String,
    pub registered_date: String,
    /// Empty in the source file for voters who have never voted
    pub last_voted_date: Option<String>,
    pub updated_at: String,
}

/// Parse every data row of the CSV at `path` into a staged working set.
///
/// The first row is the header. Any unparseable row or missing column
/// fails the whole staging step with [`VipError::MalformedInput`].
pub fn stage_records(path: &Path) -> Result<Vec<VoterRecord>> {
    if !path.exists() {
        return Err(VipError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| VipError::MalformedInput(format!("{}: {e}", path.display())))?;

    let mut records = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let record: VoterRecord = result.map_err(|e| {
            // +2: header line plus 1-based numbering
            VipError::MalformedInput(format!("{} line {}: {e}", path.display(), index + 2))
        })?;
        records.push(record);
    }

    debug!(path = %path.display(), staged = records.len(), "Staged CSV rows");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,first_name,last_name,age,gender,state,party,email,registered_date,last_voted_date,updated_at";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_stage_valid_rows() {
        let file = write_csv(&[
            "1,Alice,Nguyen,34,F,CA,Independent,alice@example.com,2016-05-12,2024-11-05,2025-01-15T08:00:00Z",
            "2,Bob,Okafor,58,M,TX,Republican,bob@example.com,2002-01-30,,2025-01-15T08:00:00Z",
        ]);

        let records = stage_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].first_name, "Alice");
        assert_eq!(records[1].last_voted_date, None);
    }

    #[test]
    fn test_stage_header_only() {
        let file = write_csv(&[]);
        assert!(stage_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_stage_non_numeric_id_fails() {
        let file = write_csv(&[
            "one,Alice,Nguyen,34,F,CA,Independent,alice@example.com,2016-05-12,,2025-01-15T08:00:00Z",
        ]);
        let err = stage_records(file.path()).unwrap_err();
        assert!(matches!(err, VipError::MalformedInput(_)));
    }

    #[test]
    fn test_stage_missing_columns_fails() {
        let file = write_csv(&["1,Alice,Nguyen"]);
        let err = stage_records(file.path()).unwrap_err();
        assert!(matches!(err, VipError::MalformedInput(_)));
    }

    #[test]
    fn test_stage_missing_file() {
        let err = stage_records(Path::new("/nonexistent/voters.csv")).unwrap_err();
        assert!(matches!(err, VipError::FileNotFound(_)));
    }
}
