//! Content fingerprinting for source files
//!
//! A fingerprint is a streaming SHA-256 digest over the whole file plus
//! a quick data-row count, both computed in a single bounded-memory
//! pass. The digest is order-sensitive: reordering rows changes it even
//! when the set of rows is identical.

use crate::error::{Result, VipError};
use crate::types::Fingerprint;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Chunk size for streaming reads
const CHUNK_SIZE: usize = 8192;

/// Compute the fingerprint of a file without loading it wholly into memory.
///
/// `row_count` is the number of newline-delimited records minus one
/// header line, clamped to zero for an empty or header-only file. A
/// final line without a trailing newline still counts.
///
/// Returns [`VipError::FileNotFound`] if the path does not exist.
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<Fingerprint> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(VipError::FileNotFound(path.display().to_string()));
    }

    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut newlines: u64 = 0;
    let mut total_bytes: u64 = 0;
    let mut last_byte: u8 = b'\n';

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        newlines += buffer[..bytes_read].iter().filter(|&&b| b == b'\n').count() as u64;
        last_byte = buffer[bytes_read - 1];
        total_bytes += bytes_read as u64;
    }

    // An unterminated final line is still a line
    let lines = if total_bytes == 0 {
        0
    } else if last_byte == b'\n' {
        newlines
    } else {
        newlines + 1
    };

    let fingerprint = Fingerprint {
        digest: hex::encode(hasher.finalize()),
        row_count: lines.saturating_sub(1),
    };
    debug!(path = %path.display(), digest = %fingerprint.digest, rows = fingerprint.row_count, "Computed file fingerprint");
    Ok(fingerprint)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_fingerprint_known_digest() {
        let file = write_temp("hello world");
        let fingerprint = fingerprint_file(file.path()).unwrap();
        assert_eq!(
            fingerprint.digest,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let file = write_temp("id,name\n1,alice\n2,bob\n");
        let first = fingerprint_file(file.path()).unwrap();
        let second = fingerprint_file(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = write_temp("id,name\n1,alice\n");
        let b = write_temp("id,name\n1,alicf\n");
        let fa = fingerprint_file(a.path()).unwrap();
        let fb = fingerprint_file(b.path()).unwrap();
        assert_ne!(fa.digest, fb.digest);
    }

    #[test]
    fn test_fingerprint_order_sensitive() {
        let a = write_temp("id,name\n1,alice\n2,bob\n");
        let b = write_temp("id,name\n2,bob\n1,alice\n");
        let fa = fingerprint_file(a.path()).unwrap();
        let fb = fingerprint_file(b.path()).unwrap();
        assert_ne!(fa.digest, fb.digest);
        assert_eq!(fa.row_count, fb.row_count);
    }

    #[test]
    fn test_row_count_excludes_header() {
        let file = write_temp("id,name\n1,alice\n2,bob\n3,carol\n");
        assert_eq!(fingerprint_file(file.path()).unwrap().row_count, 3);
    }

    #[test]
    fn test_row_count_unterminated_last_line() {
        let file = write_temp("id,name\n1,alice\n2,bob");
        assert_eq!(fingerprint_file(file.path()).unwrap().row_count, 2);
    }

    #[test]
    fn test_row_count_clamped_for_header_only() {
        let file = write_temp("id,name\n");
        assert_eq!(fingerprint_file(file.path()).unwrap().row_count, 0);
    }

    #[test]
    fn test_row_count_empty_file() {
        let file = write_temp("");
        assert_eq!(fingerprint_file(file.path()).unwrap().row_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let err = fingerprint_file("/nonexistent/voters.csv").unwrap_err();
        assert!(matches!(err, VipError::FileNotFound(_)));
    }
}
