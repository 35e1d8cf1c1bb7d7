//! Change detection against the last recorded file hash
//!
//! A pure digest comparison: O(1) against the ledger, so the expensive
//! anti-join in the loader only runs when the file actually changed.

/// Whether the current file hash represents new work.
///
/// True when no hash has ever been recorded (first load) or when the
/// hashes differ. Exact comparison only; a single changed byte anywhere
/// in the file makes it "new". Row-level novelty is decided separately
/// by the loader's anti-join, never inferred from the hash.
pub fn is_new_data(current_hash: &str, last_hash: Option<&str>) -> bool {
    match last_hash {
        None => true,
        Some(last) => current_hash != last,
    }
}
