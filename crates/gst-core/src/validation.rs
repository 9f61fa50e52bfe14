//! # Validation Module
//!
//! Structural and format validation of a raw invoice payload.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Order                                   │
//! │                                                                         │
//! │  payload (JSON object)                                                 │
//! │  ├── sellerDetails      name, address, city, state, pincode, panNo,    │
//! │  │                      gstRegistrationNo                              │
//! │  ├── placeOfSupply                                                     │
//! │  ├── billingDetails     ... pincode, stateCode                         │
//! │  ├── shippingDetails    ... pincode, stateCode                         │
//! │  ├── placeOfDelivery                                                   │
//! │  ├── orderDetails       orderNo, orderDate                             │
//! │  ├── invoiceDetails     invoiceNo, invoiceDetails, invoiceDate,        │
//! │  │                      reverseCharge                                  │
//! │  ├── items[]            description, unitPrice, quantity, discount,    │
//! │  │                      taxRate                                        │
//! │  ├── signatureImage                                                    │
//! │  └── companyLogo                                                       │
//! │                                                                         │
//! │  Walk stops at the FIRST failure. Undeclared keys are rejected after   │
//! │  the declared keys of the same object.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gst_core::validation::validate;
//! use serde_json::json;
//!
//! let verdict = validate(&json!({ "sellerDetails": {} }));
//! assert!(!verdict.valid);
//! assert_eq!(
//!     verdict.message.as_deref(),
//!     Some("Invalid input data: sellerDetails.name is required")
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::ValidationError;
use crate::types::{parse_iso_date, parse_numeric_text, ReverseCharge};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The only GST rate line items may carry.
pub const SUPPORTED_TAX_RATE: f64 = 18.0;

/// Minimum number of line items on an invoice.
pub const MIN_LINE_ITEMS: usize = 1;

/// Largest integer a JSON number can carry without precision loss (2^53 − 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

// ASCII digit classes only; `\d` also matches non-ASCII digits.
static PINCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("pincode pattern compiles"));
static PAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN pattern compiles"));
static STATE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").expect("state code pattern compiles"));

const ROOT_FIELDS: [&str; 10] = [
    "sellerDetails",
    "placeOfSupply",
    "billingDetails",
    "shippingDetails",
    "placeOfDelivery",
    "orderDetails",
    "invoiceDetails",
    "items",
    "signatureImage",
    "companyLogo",
];
const SELLER_FIELDS: [&str; 7] = [
    "name",
    "address",
    "city",
    "state",
    "pincode",
    "panNo",
    "gstRegistrationNo",
];
const PARTY_FIELDS: [&str; 6] = ["name", "address", "city", "state", "pincode", "stateCode"];
const ORDER_FIELDS: [&str; 2] = ["orderNo", "orderDate"];
const INVOICE_FIELDS: [&str; 4] = ["invoiceNo", "invoiceDetails", "invoiceDate", "reverseCharge"];
const ITEM_FIELDS: [&str; 5] = ["description", "unitPrice", "quantity", "discount", "taxRate"];

// =============================================================================
// Verdict
// =============================================================================

/// Caller-facing outcome of [`validate`].
///
/// Serializes as `{"valid":true}` or `{"valid":false,"message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationVerdict {
    pub fn accepted() -> Self {
        ValidationVerdict {
            valid: true,
            message: None,
        }
    }

    pub fn rejected(error: &ValidationError) -> Self {
        ValidationVerdict {
            valid: false,
            message: Some(format!("Invalid input data: {error}")),
        }
    }
}

/// Validates a raw payload and reports the first failure as a message.
pub fn validate(payload: &Value) -> ValidationVerdict {
    match validate_invoice(payload) {
        Ok(()) => ValidationVerdict::accepted(),
        Err(error) => ValidationVerdict::rejected(&error),
    }
}

// =============================================================================
// Schema Walk
// =============================================================================

/// Validates a raw payload, returning the first rule it breaks.
///
/// Does not mutate or normalize the payload.
pub fn validate_invoice(payload: &Value) -> ValidationResult<()> {
    let root = match payload {
        Value::Object(map) => map,
        _ => {
            return Err(ValidationError::WrongType {
                field: "payload".to_string(),
                expected: "an object",
            })
        }
    };

    validate_seller(root.get("sellerDetails"))?;
    required_string(root, "", "placeOfSupply")?;
    validate_party(root.get("billingDetails"), "billingDetails")?;
    validate_party(root.get("shippingDetails"), "shippingDetails")?;
    required_string(root, "", "placeOfDelivery")?;
    validate_order(root.get("orderDetails"))?;
    validate_invoice_details(root.get("invoiceDetails"))?;
    validate_items(root.get("items"))?;
    required_uri(root, "", "signatureImage")?;
    required_uri(root, "", "companyLogo")?;
    reject_unknown(root, "", &ROOT_FIELDS)
}

fn validate_seller(value: Option<&Value>) -> ValidationResult<()> {
    let parent = "sellerDetails";
    let seller = required_object(value, parent)?;

    for key in ["name", "address", "city", "state"] {
        required_string(seller, parent, key)?;
    }
    matching_string(seller, parent, "pincode", &PINCODE, "6-digit pincode")?;
    matching_string(seller, parent, "panNo", &PAN, "PAN (AAAAA9999A)")?;
    required_string(seller, parent, "gstRegistrationNo")?;

    reject_unknown(seller, parent, &SELLER_FIELDS)
}

fn validate_party(value: Option<&Value>, parent: &str) -> ValidationResult<()> {
    let party = required_object(value, parent)?;

    for key in ["name", "address", "city", "state"] {
        required_string(party, parent, key)?;
    }
    matching_string(party, parent, "pincode", &PINCODE, "6-digit pincode")?;
    matching_string(party, parent, "stateCode", &STATE_CODE, "1-2 digit state code")?;

    reject_unknown(party, parent, &PARTY_FIELDS)
}

fn validate_order(value: Option<&Value>) -> ValidationResult<()> {
    let parent = "orderDetails";
    let order = required_object(value, parent)?;

    required_string(order, parent, "orderNo")?;
    required_date(order, parent, "orderDate")?;

    reject_unknown(order, parent, &ORDER_FIELDS)
}

fn validate_invoice_details(value: Option<&Value>) -> ValidationResult<()> {
    let parent = "invoiceDetails";
    let details = required_object(value, parent)?;

    required_string(details, parent, "invoiceNo")?;
    required_string(details, parent, "invoiceDetails")?;
    required_date(details, parent, "invoiceDate")?;
    validate_reverse_charge(details, parent)?;

    reject_unknown(details, parent, &INVOICE_FIELDS)
}

fn validate_reverse_charge(details: &Map<String, Value>, parent: &str) -> ValidationResult<()> {
    let field = path(parent, "reverseCharge");
    match details.get("reverseCharge") {
        None => Err(ValidationError::Required { field }),
        Some(Value::String(s)) if ReverseCharge::ALLOWED.contains(&s.as_str()) => Ok(()),
        Some(_) => Err(ValidationError::NotAllowed {
            field,
            allowed: ReverseCharge::ALLOWED.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

fn validate_items(value: Option<&Value>) -> ValidationResult<()> {
    let field = "items".to_string();
    let items = match value {
        None => return Err(ValidationError::Required { field }),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::WrongType {
                field,
                expected: "an array",
            })
        }
    };

    if items.len() < MIN_LINE_ITEMS {
        return Err(ValidationError::TooFewItems {
            field,
            min: MIN_LINE_ITEMS,
        });
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item, &format!("items[{index}]"))?;
    }

    Ok(())
}

/// Validates one line item.
///
/// ## Rules
/// - description: non-empty string
/// - unitPrice: number > 0
/// - quantity: integer > 0 (and ≤ 2^53 − 1)
/// - discount: number ≥ 0, optional
/// - taxRate: exactly 18
fn validate_line_item(value: &Value, parent: &str) -> ValidationResult<()> {
    let item = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ValidationError::WrongType {
                field: parent.to_string(),
                expected: "an object",
            })
        }
    };

    required_string(item, parent, "description")?;

    let unit_price = required_number(item, parent, "unitPrice")?;
    if unit_price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: path(parent, "unitPrice"),
        });
    }

    let quantity = required_number(item, parent, "quantity")?;
    if quantity.fract() != 0.0 {
        return Err(ValidationError::MustBeInteger {
            field: path(parent, "quantity"),
        });
    }
    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: path(parent, "quantity"),
        });
    }
    if quantity > MAX_SAFE_INTEGER as f64 {
        return Err(ValidationError::OutOfRange {
            field: path(parent, "quantity"),
            min: 1,
            max: MAX_SAFE_INTEGER,
        });
    }

    if item.contains_key("discount") {
        let discount = required_number(item, parent, "discount")?;
        if discount < 0.0 {
            return Err(ValidationError::MustBeNonNegative {
                field: path(parent, "discount"),
            });
        }
    }

    let tax_rate = required_number(item, parent, "taxRate")?;
    if tax_rate != SUPPORTED_TAX_RATE {
        return Err(ValidationError::UnsupportedTaxRate {
            field: path(parent, "taxRate"),
            rate: item
                .get("taxRate")
                .map(Value::to_string)
                .unwrap_or_default(),
        });
    }

    reject_unknown(item, parent, &ITEM_FIELDS)
}

// =============================================================================
// Field Helpers
// =============================================================================

fn path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn required_object<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> ValidationResult<&'a Map<String, Value>> {
    match value {
        None => Err(ValidationError::Required {
            field: field.to_string(),
        }),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ValidationError::WrongType {
            field: field.to_string(),
            expected: "an object",
        }),
    }
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    parent: &str,
    key: &str,
) -> ValidationResult<&'a str> {
    match object.get(key) {
        None => Err(ValidationError::Required {
            field: path(parent, key),
        }),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Empty {
            field: path(parent, key),
        }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::WrongType {
            field: path(parent, key),
            expected: "a string",
        }),
    }
}

fn matching_string(
    object: &Map<String, Value>,
    parent: &str,
    key: &str,
    pattern: &Regex,
    rule: &'static str,
) -> ValidationResult<()> {
    let value = required_string(object, parent, key)?;
    if !pattern.is_match(value) {
        return Err(ValidationError::PatternMismatch {
            field: path(parent, key),
            value: value.to_string(),
            rule,
        });
    }
    Ok(())
}

fn required_date(object: &Map<String, Value>, parent: &str, key: &str) -> ValidationResult<()> {
    let value = required_string(object, parent, key)?;
    if parse_iso_date(value).is_none() {
        return Err(ValidationError::InvalidFormat {
            field: path(parent, key),
            reason: "must be a valid ISO 8601 date".to_string(),
        });
    }
    Ok(())
}

fn required_uri(object: &Map<String, Value>, parent: &str, key: &str) -> ValidationResult<()> {
    let value = required_string(object, parent, key)?;
    if Url::parse(value).is_err() {
        return Err(ValidationError::InvalidFormat {
            field: path(parent, key),
            reason: "must be a valid uri".to_string(),
        });
    }
    Ok(())
}

fn required_number(object: &Map<String, Value>, parent: &str, key: &str) -> ValidationResult<f64> {
    match object.get(key) {
        None => Err(ValidationError::Required {
            field: path(parent, key),
        }),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ValidationError::WrongType {
            field: path(parent, key),
            expected: "a number",
        }),
        // numeric text is read as the number it spells
        Some(Value::String(text)) => parse_numeric_text(text).ok_or_else(|| ValidationError::WrongType {
            field: path(parent, key),
            expected: "a number",
        }),
        Some(_) => Err(ValidationError::WrongType {
            field: path(parent, key),
            expected: "a number",
        }),
    }
}

fn reject_unknown(object: &Map<String, Value>, parent: &str, declared: &[&str]) -> ValidationResult<()> {
    match object.keys().find(|key| !declared.contains(&key.as_str())) {
        Some(key) => Err(ValidationError::UnknownField {
            field: path(parent, key),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
