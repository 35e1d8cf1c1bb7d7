//! VIP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the VIP workspace.
//!
//! # Overview
//!
//! This crate provides the pieces used across all VIP workspace members:
//!
//! - **Error Handling**: the `VipError` taxonomy and `Result` alias
//! - **Fingerprinting**: streaming content digest + row count for source files
//! - **Logging**: tracing subscriber configuration
//! - **Types**: shared domain types (`Fingerprint`, `LoadStatus`, `LedgerEntry`)
//!
//! # Example
//!
//! ```no_run
//! use vip_common::fingerprint::fingerprint_file;
//! use vip_common::Result;
//!
//! fn check(path: &str) -> Result<()> {
//!     let fingerprint = fingerprint_file(path)?;
//!     println!("digest: {}", fingerprint.digest);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VipError};
pub use types::{Fingerprint, LedgerEntry, LoadStatus};
