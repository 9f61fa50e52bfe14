//! # Filesystem Store
//!
//! Writes each rendered document to `<root>/invoice_<invoiceNumber>.<ext>`.
//! The root directory is created on first save.

use std::fs;
use std::path::PathBuf;

use gst_core::DocumentStore;
use tracing::{debug, error, info};

use crate::error::{StoreError, StoreResult};

/// Stores documents under a single directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsDocumentStore { root: root.into() }
    }

    /// Path a document for `invoice_number` would be written to.
    pub fn document_path(&self, invoice_number: &str, extension: &str) -> StoreResult<PathBuf> {
        validate_invoice_number(invoice_number)?;
        Ok(self
            .root
            .join(format!("invoice_{invoice_number}.{extension}")))
    }

    fn write(&self, document: &[u8], invoice_number: &str, extension: &str) -> StoreResult<PathBuf> {
        let path = self.document_path(invoice_number, extension)?;

        fs::create_dir_all(&self.root).map_err(|source| StoreError::CreateDir {
            path: self.root.clone(),
            source,
        })?;
        debug!(root = %self.root.display(), "Output directory ready");

        fs::write(&path, document).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

impl DocumentStore for FsDocumentStore {
    type Error = StoreError;

    fn save(&self, document: &[u8], invoice_number: &str, extension: &str) -> StoreResult<String> {
        match self.write(document, invoice_number, extension) {
            Ok(path) => {
                info!(
                    invoice_number,
                    path = %path.display(),
                    bytes = document.len(),
                    "Invoice saved"
                );
                Ok(path.display().to_string())
            }
            Err(err) => {
                error!(invoice_number, error = %err, "Error saving invoice");
                Err(err)
            }
        }
    }
}

/// Invoice numbers become part of a file name, so they must not escape the root.
fn validate_invoice_number(invoice_number: &str) -> StoreResult<()> {
    let unusable = invoice_number.is_empty()
        || invoice_number == "."
        || invoice_number == ".."
        || invoice_number.contains(['/', '\\', '\0']);

    if unusable {
        return Err(StoreError::InvalidInvoiceNumber(invoice_number.to_string()));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().join("invoices"));

        let location = store.save(b"hello", "INV-2024-0107", "txt").unwrap();

        let expected = dir.path().join("invoices").join("invoice_INV-2024-0107.txt");
        assert_eq!(location, expected.display().to_string());
        assert_eq!(fs::read(&expected).unwrap(), b"hello");
    }

    #[test]
    fn test_save_overwrites_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        store.save(b"first", "INV-1", "txt").unwrap();
        let location = store.save(b"second", "INV-1", "txt").unwrap();

        assert_eq!(fs::read(location).unwrap(), b"second");
    }

    #[test]
    fn test_rejects_path_like_invoice_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());

        for number in ["", ".", "..", "../etc/passwd", "a/b", "a\\b"] {
            let err = store.save(b"x", number, "txt").unwrap_err();
            assert!(matches!(err, StoreError::InvalidInvoiceNumber(_)), "{number}");
        }
    }

    #[test]
    fn test_reports_unwritable_root() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let store = FsDocumentStore::new(&blocker);
        let err = store.save(b"x", "INV-1", "txt").unwrap_err();
        assert!(matches!(err, StoreError::CreateDir { .. }));
    }
}
