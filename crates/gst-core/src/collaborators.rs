//! # Collaborator Contracts
//!
//! Seams to the rendering and storage layers that live outside this crate.
//!
//! ```text
//! RenderModel ──► DocumentRenderer::render ──► bytes ──► DocumentStore::save ──► location
//! ```
//!
//! Implementations may do I/O; the traits themselves do not.

use crate::assemble::RenderModel;

/// Turns a render model into a document.
pub trait DocumentRenderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, Self::Error>;

    /// Extension of the produced document, without the dot (e.g. `txt`).
    fn file_extension(&self) -> &str;
}

/// Persists a rendered document and reports where it went.
pub trait DocumentStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Saves `document` for `invoice_number`, returning a location identifier.
    fn save(&self, document: &[u8], invoice_number: &str, extension: &str) -> Result<String, Self::Error>;
}
