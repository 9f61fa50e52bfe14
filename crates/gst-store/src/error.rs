//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! std::io::Error ──► StoreError (adds the path) ──► anyhow (CLI) ──► stderr
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Document storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The invoice number cannot be used as part of a file name.
    ///
    /// ## When This Occurs
    /// - Empty invoice number
    /// - Contains `/` or `\`
    /// - Is `.` or `..`
    #[error("Invoice number {0:?} cannot be used as a file name")]
    InvalidInvoiceNumber(String),

    /// The output directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
