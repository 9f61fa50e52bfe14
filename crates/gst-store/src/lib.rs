//! # gst-store: Document Storage for GST Invoices
//!
//! Filesystem implementation of [`gst_core::DocumentStore`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DocumentRenderer::render ──► bytes                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    gst-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   FsDocumentStore::save(bytes, "INV-7", "txt")                  │   │
//! │  │       └──► <root>/invoice_INV-7.txt                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  location (file path) returned to the caller                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gst_core::DocumentStore;
//! use gst_store::FsDocumentStore;
//!
//! let store = FsDocumentStore::new("invoices");
//! let location = store.save(b"...", "INV-2024-0107", "txt")?;
//! # Ok::<(), gst_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filesystem;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use filesystem::FsDocumentStore;
