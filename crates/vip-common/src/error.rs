//! Error types for VIP
//!
//! One taxonomy shared across the workspace. Errors raised before any
//! store mutation (`FileNotFound`, `MalformedInput`) are safe to retry
//! without cleanup; the orchestrator relies on that distinction.

use thiserror::Error;

/// Result type alias for VIP operations
pub type Result<T> = std::result::Result<T, VipError>;

/// Main error type for VIP
#[derive(Error, Debug)]
pub enum VipError {
    /// Source file or database file missing where absence was not expected
    #[error("File not found: '{0}'. Verify the path exists and you have read permissions.")]
    FileNotFound(String),

    /// Staging/parse failure for the source CSV
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Underlying store locked or unreachable
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Generic wrapper for loader failure
    #[error("Load failed: {0}")]
    FailedLoad(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}
