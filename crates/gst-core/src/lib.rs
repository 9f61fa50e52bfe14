//! # gst-core: Pure Business Logic for GST Invoices
//!
//! This crate is the **heart** of the invoice pipeline. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Pipeline                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    invoice-cli                                  │   │
//! │  │    read payload ──► assemble ──► render ──► store               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gst-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │  │  totals   │  │   words   │  │ assemble  │  │   │
//! │  │   │  schema   │  │ CGST/SGST │  │  crore /  │  │  render   │  │   │
//! │  │   │  walk     │  │  or IGST  │  │  lakh     │  │  model    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gst-store (Storage Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (parties, line items, tax split)
//! - [`money`] - Exact decimal money
//! - [`error`] - Domain error types
//! - [`validation`] - Payload schema validation
//! - [`totals`] - Line and invoice GST arithmetic
//! - [`words`] - Amount in words (Indian grouping)
//! - [`assemble`] - Validate → compute → spell, as one call
//! - [`collaborators`] - Renderer and store traits
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//!
//! let payload = json!({ "items": [] });
//! let verdict = gst_core::validate(&payload);
//! assert!(!verdict.valid);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assemble;
pub mod collaborators;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assemble::{assemble, RenderModel, AMOUNT_IN_WORDS_SUFFIX};
pub use collaborators::{DocumentRenderer, DocumentStore};
pub use error::{InvoiceError, InvoiceResult, ValidationError};
pub use money::Money;
pub use totals::{compute_totals, Totals};
pub use types::*;
pub use validation::{validate, validate_invoice, ValidationVerdict};
pub use words::to_words;
