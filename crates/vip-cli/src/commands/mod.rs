//! CLI command implementations

pub mod history;
pub mod ingest;
pub mod init_db;
pub mod status;

use colored::{ColoredString, Colorize};
use vip_common::types::LoadStatus;

/// Colored status label for terminal output
pub(crate) fn status_label(status: LoadStatus) -> ColoredString {
    match status {
        LoadStatus::Success => status.as_str().green(),
        LoadStatus::NoOp => status.as_str().yellow(),
        LoadStatus::Failed => status.as_str().red(),
    }
}

/// Shortened digest for display
pub(crate) fn short_hash(digest: &str) -> &str {
    &digest[..digest.len().min(16)]
}
