//! # Error Types
//!
//! Domain-specific error types for gst-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gst-core errors (this file)                                           │
//! │  ├── InvoiceError     - Assembly failures                              │
//! │  └── ValidationError  - First rule the payload breaks                  │
//! │                                                                         │
//! │  gst-store errors (separate crate)                                     │
//! │  └── StoreError       - Filesystem failures                            │
//! │                                                                         │
//! │  Flow: ValidationError → InvoiceError → anyhow (CLI) → stderr          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation message names the offending field path and the rule
//! 3. Errors are enum variants, never String
//! 4. Only the first failure is ever reported

use thiserror::Error;

// =============================================================================
// Invoice Error
// =============================================================================

/// Errors produced while assembling an invoice render model.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The payload broke a schema rule.
    #[error("Invalid input data: {0}")]
    Validation(#[from] ValidationError),

    /// The payload passed validation but could not be read into the typed
    /// model. Indicates a gap between the validator and the model.
    #[error("Malformed invoice payload: {0}")]
    MalformedPayload(String),

    /// The grand total cannot be written as a non-negative whole amount.
    ///
    /// ## When This Occurs
    /// - A discount larger than `unitPrice × quantity` drives the total
    ///   below zero
    #[error("Grand total {amount} cannot be expressed in words")]
    AmountOutOfRange { amount: String },

    /// A derived amount does not fit in a decimal.
    ///
    /// `field` names the figure being computed, e.g. `items[0].netAmount`
    /// or `grandTotal`.
    #[error("{field} is too large to compute")]
    AmountOverflow { field: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Payload validation errors.
///
/// `field` is always the full path of the offending value, e.g.
/// `sellerDetails.pincode` or `items[2].taxRate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// A string field is present but empty.
    #[error("{field} is not allowed to be empty")]
    Empty { field: String },

    /// The value has the wrong JSON type.
    #[error("{field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A string does not match a required format.
    ///
    /// ## Example
    /// ```text
    /// sellerDetails.pincode with value "12345" fails to match the 6-digit pincode pattern
    /// ```
    #[error("{field} with value \"{value}\" fails to match the {rule} pattern")]
    PatternMismatch {
        field: String,
        value: String,
        rule: &'static str,
    },

    /// Invalid format (e.g., invalid date, invalid URI).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        allowed: Vec<String>,
    },

    /// Value must be strictly positive.
    #[error("{field} must be a positive number")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must be greater than or equal to 0")]
    MustBeNonNegative { field: String },

    /// Value must be a whole number.
    #[error("{field} must be an integer")]
    MustBeInteger { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Only the 18% GST slab is accepted.
    #[error("{field} must be 18 (the only supported GST rate), got {rate}")]
    UnsupportedTaxRate { field: String, rate: String },

    /// Collection has fewer elements than required.
    #[error("{field} must contain at least {min} item(s)")]
    TooFewItems { field: String, min: usize },

    /// Key is not part of the schema.
    #[error("{field} is not allowed")]
    UnknownField { field: String },
}

impl ValidationError {
    /// Path of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::Empty { field }
            | ValidationError::WrongType { field, .. }
            | ValidationError::PatternMismatch { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::MustBeInteger { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnsupportedTaxRate { field, .. }
            | ValidationError::TooFewItems { field, .. }
            | ValidationError::UnknownField { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with InvoiceError.
pub type InvoiceResult<T> = Result<T, InvoiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_message_names_rule() {
        let err = ValidationError::PatternMismatch {
            field: "sellerDetails.pincode".to_string(),
            value: "12345".to_string(),
            rule: "6-digit pincode",
        };
        assert_eq!(
            err.to_string(),
            "sellerDetails.pincode with value \"12345\" fails to match the 6-digit pincode pattern"
        );
        assert_eq!(err.field(), "sellerDetails.pincode");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "orderDetails".to_string(),
        };
        assert_eq!(err.to_string(), "orderDetails is required");

        let err = ValidationError::NotAllowed {
            field: "invoiceDetails.reverseCharge".to_string(),
            allowed: vec!["Yes".to_string(), "No".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invoiceDetails.reverseCharge must be one of: [\"Yes\", \"No\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_invoice_error() {
        let validation_err = ValidationError::UnsupportedTaxRate {
            field: "items[0].taxRate".to_string(),
            rate: "12".to_string(),
        };
        let err: InvoiceError = validation_err.into();
        assert!(matches!(err, InvoiceError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Invalid input data: items[0].taxRate must be 18 (the only supported GST rate), got 12"
        );
    }
}
