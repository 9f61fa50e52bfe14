//! # Invoice Assembly
//!
//! The single entry point for callers: raw payload in, render model out.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  raw JSON ──► validate_invoice ──► InvoicePayload ──► compute_totals   │
//! │                    │                                        │          │
//! │                    ▼ (first failure)                        ▼          │
//! │              InvoiceError                      round(grandTotal)       │
//! │                                                             │          │
//! │                                                             ▼          │
//! │                                     to_words + " Rupees Only"          │
//! │                                                             │          │
//! │                                                             ▼          │
//! │                                                       RenderModel      │
//! │                                                                         │
//! │  Each stage runs only after the previous one succeeded. No partial     │
//! │  model is ever returned.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::error::{InvoiceError, InvoiceResult};
use crate::money::Money;
use crate::totals::compute_totals;
use crate::types::{
    ComputedLineItem, InvoiceDetails, InvoicePayload, OrderDetails, PartyDetails, SellerDetails,
};
use crate::validation::validate_invoice;
use crate::words::to_words;

/// Appended to the spelled-out grand total.
pub const AMOUNT_IN_WORDS_SUFFIX: &str = "Rupees Only";

/// Everything the rendering collaborator needs for one invoice.
///
/// Carries every payload field, with `items` replaced by their enriched
/// form, plus the aggregates and the amount in words.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub seller_details: SellerDetails,
    pub place_of_supply: String,
    pub billing_details: PartyDetails,
    pub shipping_details: PartyDetails,
    pub place_of_delivery: String,
    pub order_details: OrderDetails,
    pub invoice_details: InvoiceDetails,
    pub items: Vec<ComputedLineItem>,
    pub signature_image: String,
    pub company_logo: String,
    pub total_net_amount: Money,
    pub total_tax_amount: Money,
    pub grand_total: Money,
    pub amount_in_words: String,
}

impl RenderModel {
    /// The invoice number, used to name the stored document.
    pub fn invoice_number(&self) -> &str {
        &self.invoice_details.invoice_no
    }

    /// True when the invoice is taxed as an intra-state supply.
    pub fn is_intra_state(&self) -> bool {
        self.place_of_supply == self.place_of_delivery
    }
}

/// Validates, computes and spells out one invoice.
///
/// ## Errors
/// - [`InvoiceError::Validation`] with the first rule the payload breaks
/// - [`InvoiceError::AmountOutOfRange`] when the grand total is negative
/// - [`InvoiceError::AmountOverflow`] when a derived amount is too large
pub fn assemble(payload: &Value) -> InvoiceResult<RenderModel> {
    validate_invoice(payload)?;

    let invoice: InvoicePayload = serde_json::from_value(payload.clone())
        .map_err(|e| InvoiceError::MalformedPayload(e.to_string()))?;

    assemble_payload(invoice)
}

/// Assembly for an already-validated, typed payload.
pub fn assemble_payload(invoice: InvoicePayload) -> InvoiceResult<RenderModel> {
    let totals = compute_totals(
        &invoice.items,
        &invoice.place_of_supply,
        &invoice.place_of_delivery,
    )?;

    let rupees = totals
        .grand_total
        .whole_units()
        .ok_or_else(|| InvoiceError::AmountOutOfRange {
            amount: totals.grand_total.amount().to_string(),
        })?;
    let amount_in_words = format!("{} {}", to_words(rupees), AMOUNT_IN_WORDS_SUFFIX);

    Ok(RenderModel {
        seller_details: invoice.seller_details,
        place_of_supply: invoice.place_of_supply,
        billing_details: invoice.billing_details,
        shipping_details: invoice.shipping_details,
        place_of_delivery: invoice.place_of_delivery,
        order_details: invoice.order_details,
        invoice_details: invoice.invoice_details,
        items: totals.items,
        signature_image: invoice.signature_image,
        company_logo: invoice.company_logo,
        total_net_amount: totals.total_net_amount,
        total_tax_amount: totals.total_tax_amount,
        grand_total: totals.grand_total,
        amount_in_words,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReverseCharge;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload(place_of_delivery: &str, items: Value) -> Value {
        json!({
            "sellerDetails": {
                "name": "Acme Traders",
                "address": "12 MG Road",
                "city": "Pune",
                "state": "Maharashtra",
                "pincode": "411001",
                "panNo": "ABCDE1234F",
                "gstRegistrationNo": "27ABCDE1234F1Z5"
            },
            "placeOfSupply": "27",
            "billingDetails": {
                "name": "Globex", "address": "4 Park Street", "city": "Mumbai",
                "state": "Maharashtra", "pincode": "400001", "stateCode": "27"
            },
            "shippingDetails": {
                "name": "Globex", "address": "4 Park Street", "city": "Mumbai",
                "state": "Maharashtra", "pincode": "400001", "stateCode": "27"
            },
            "placeOfDelivery": place_of_delivery,
            "orderDetails": { "orderNo": "PO-1", "orderDate": "2024-03-01" },
            "invoiceDetails": {
                "invoiceNo": "INV-1",
                "invoiceDetails": "Against PO-1",
                "invoiceDate": "2024-03-02",
                "reverseCharge": "Yes"
            },
            "items": items,
            "signatureImage": "https://cdn.example.com/sign.png",
            "companyLogo": "https://cdn.example.com/logo.png"
        })
    }

    fn widget() -> Value {
        json!([{ "description": "Widget", "unitPrice": 1000, "quantity": 2, "discount": 0, "taxRate": 18 }])
    }

    #[test]
    fn test_assembles_intra_state_invoice() {
        let model = assemble(&payload("27", widget())).unwrap();

        assert_eq!(model.grand_total.amount(), dec!(2360));
        assert_eq!(model.amount_in_words, "Two Thousand Three Hundred Sixty Rupees Only");
        assert_eq!(model.invoice_number(), "INV-1");
        assert_eq!(model.invoice_details.reverse_charge, ReverseCharge::Yes);
        assert!(model.is_intra_state());
        assert_eq!(model.items[0].split.cgst(), Some(Money::new(dec!(180))));
    }

    #[test]
    fn test_words_use_rounded_grand_total() {
        // 0.5 × 18% = 0.09 → 0.59 → rounds to 1
        let items = json!([{ "description": "Pin", "unitPrice": 0.5, "quantity": 1, "taxRate": 18 }]);
        let model = assemble(&payload("27", items)).unwrap();

        assert_eq!(model.grand_total.amount(), dec!(0.59));
        assert_eq!(model.amount_in_words, "One Rupees Only");
    }

    #[test]
    fn test_zero_rounded_total() {
        let items = json!([{ "description": "Pin", "unitPrice": 0.2, "quantity": 1, "taxRate": 18 }]);
        let model = assemble(&payload("27", items)).unwrap();
        assert_eq!(model.amount_in_words, "Zero Rupees Only");
    }

    #[test]
    fn test_validation_failure_short_circuits() {
        let items = json!([{ "description": "Widget", "unitPrice": 1000, "quantity": 2, "taxRate": 12 }]);
        let err = assemble(&payload("27", items)).unwrap_err();

        assert!(matches!(err, InvoiceError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid input data: items[0].taxRate"));
    }

    #[test]
    fn test_negative_total_is_rejected() {
        let items = json!([{ "description": "Refund", "unitPrice": 10, "quantity": 1, "discount": 50, "taxRate": 18 }]);
        let err = assemble(&payload("27", items)).unwrap_err();
        assert!(matches!(err, InvoiceError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_render_model_serialization() {
        let model = assemble(&payload("29", widget())).unwrap();
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["sellerDetails"]["panNo"], "ABCDE1234F");
        assert_eq!(json["orderDetails"]["orderDate"], "2024-03-01");
        assert_eq!(json["items"][0]["igst"], 360.0);
        assert_eq!(json["grandTotal"], 2360.0);
        assert_eq!(json["amountInWords"], "Two Thousand Three Hundred Sixty Rupees Only");
    }

    #[test]
    fn test_dates_keep_caller_text() {
        let mut raw = payload("27", widget());
        raw["invoiceDetails"]["invoiceDate"] = json!("2024-03-05T10:00:00+05:30");
        raw["orderDetails"]["orderDate"] = json!("2024-03-04 18:45");

        let model = assemble(&raw).unwrap();
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["invoiceDetails"]["invoiceDate"], "2024-03-05T10:00:00+05:30");
        assert_eq!(json["orderDetails"]["orderDate"], "2024-03-04 18:45");
        assert_eq!(
            model.invoice_details.invoice_date.date(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn test_numeric_strings_are_computed() {
        let items = json!([{ "description": "Widget", "unitPrice": "1000", "quantity": "2", "taxRate": "18" }]);
        let model = assemble(&payload("27", items)).unwrap();

        assert_eq!(model.grand_total.amount(), dec!(2360));
        assert_eq!(model.items[0].item.quantity, 2);
        assert_eq!(model.amount_in_words, "Two Thousand Three Hundred Sixty Rupees Only");
    }

    #[test]
    fn test_overflowing_amounts_are_an_error() {
        let items = json!([{ "description": "Bulk", "unitPrice": 1e20, "quantity": 1_000_000_000_000_000u64, "taxRate": 18 }]);
        let raw = payload("27", items);
        assert!(crate::validation::validate(&raw).valid);

        let err = assemble(&raw).unwrap_err();
        assert!(matches!(
            &err,
            InvoiceError::AmountOverflow { field } if field == "items[0].netAmount"
        ));
    }

    #[test]
    fn test_tax_overflow_is_an_error() {
        let items = json!([{ "description": "Bulk", "unitPrice": 5e27, "quantity": 1, "taxRate": 18 }]);
        let err = assemble(&payload("29", items)).unwrap_err();
        assert!(matches!(err, InvoiceError::AmountOverflow { .. }));
    }

    #[test]
    fn test_price_beyond_decimal_range_is_an_error() {
        let items = json!([{ "description": "Bulk", "unitPrice": 1e30, "quantity": 1, "taxRate": 18 }]);
        assert!(assemble(&payload("27", items)).is_err());
    }
}
