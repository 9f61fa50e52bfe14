//! # Totals Module
//!
//! Per-line and invoice-wide GST arithmetic.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For each item, in order:                                               │
//! │                                                                         │
//! │    netAmount   = unitPrice × quantity − discount                       │
//! │    taxAmount   = netAmount × taxRate / 100                             │
//! │    totalAmount = netAmount + taxAmount                                 │
//! │    split       = CGST+SGST (same place) │ IGST (different places)      │
//! │                                                                         │
//! │  Then:                                                                  │
//! │    totalNetAmount = Σ netAmount                                        │
//! │    totalTaxAmount = Σ taxAmount                                        │
//! │    grandTotal     = totalNetAmount + totalTaxAmount                    │
//! │                                                                         │
//! │  No rounding anywhere in this module.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers must validate first; nothing here re-checks the inputs. Every
//! step is overflow-checked and reports the figure that did not fit.

use serde::Serialize;

use crate::error::{InvoiceError, InvoiceResult};
use crate::money::Money;
use crate::types::{ComputedLineItem, LineItem, TaxSplit};

/// Enriched items plus the invoice aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub items: Vec<ComputedLineItem>,
    pub total_net_amount: Money,
    pub total_tax_amount: Money,
    pub grand_total: Money,
}

/// Computes the derived amounts for one item.
///
/// The tax split is decided here, per item, from the two location codes.
/// On overflow the error names the amount, e.g. `netAmount`; callers add
/// the item position.
pub fn compute_line(
    item: &LineItem,
    place_of_supply: &str,
    place_of_delivery: &str,
) -> Result<ComputedLineItem, &'static str> {
    let net_amount = item
        .unit_price
        .checked_mul_quantity(item.quantity)
        .and_then(|gross| gross.checked_sub(item.discount))
        .ok_or("netAmount")?;
    let tax_amount = net_amount.checked_tax(item.tax_rate).ok_or("taxAmount")?;
    let total_amount = net_amount.checked_add(tax_amount).ok_or("totalAmount")?;

    Ok(ComputedLineItem {
        item: item.clone(),
        net_amount,
        tax_amount,
        total_amount,
        split: TaxSplit::for_places(tax_amount, place_of_supply, place_of_delivery),
    })
}

/// Enriches every item and accumulates the aggregates in sequence order.
///
/// The input slice is left untouched; the returned items are fresh copies.
///
/// ## Errors
/// [`InvoiceError::AmountOverflow`] when any line figure or aggregate does
/// not fit in a decimal.
///
/// ## Example
/// ```rust
/// use gst_core::money::Money;
/// use gst_core::totals::compute_totals;
/// use gst_core::types::{LineItem, TaxRate};
/// use rust_decimal::Decimal;
///
/// let items = vec![LineItem {
///     description: "Widget".to_string(),
///     unit_price: Money::new(Decimal::from(1000)),
///     quantity: 2,
///     discount: Money::zero(),
///     tax_rate: TaxRate::GST_18,
/// }];
///
/// let totals = compute_totals(&items, "27", "27").unwrap();
/// assert_eq!(totals.grand_total.amount(), Decimal::from(2360));
/// ```
pub fn compute_totals(
    items: &[LineItem],
    place_of_supply: &str,
    place_of_delivery: &str,
) -> InvoiceResult<Totals> {
    let mut total_net_amount = Money::zero();
    let mut total_tax_amount = Money::zero();
    let mut computed = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let line = compute_line(item, place_of_supply, place_of_delivery)
            .map_err(|amount| overflow(format!("items[{index}].{amount}")))?;

        total_net_amount = total_net_amount
            .checked_add(line.net_amount)
            .ok_or_else(|| overflow("totalNetAmount".to_string()))?;
        total_tax_amount = total_tax_amount
            .checked_add(line.tax_amount)
            .ok_or_else(|| overflow("totalTaxAmount".to_string()))?;
        computed.push(line);
    }

    let grand_total = total_net_amount
        .checked_add(total_tax_amount)
        .ok_or_else(|| overflow("grandTotal".to_string()))?;

    Ok(Totals {
        items: computed,
        total_net_amount,
        total_tax_amount,
        grand_total,
    })
}

fn overflow(field: String) -> InvoiceError {
    InvoiceError::AmountOverflow { field }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn item(unit_price: Decimal, quantity: u64, discount: Decimal) -> LineItem {
        LineItem {
            description: "Item".to_string(),
            unit_price: Money::new(unit_price),
            quantity,
            discount: Money::new(discount),
            tax_rate: TaxRate::GST_18,
        }
    }

    #[test]
    fn test_single_item_intra_state() {
        let totals = compute_totals(&[item(dec!(1000), 2, dec!(0))], "27", "27").unwrap();
        let line = &totals.items[0];

        assert_eq!(line.net_amount.amount(), dec!(2000));
        assert_eq!(line.tax_amount.amount(), dec!(360));
        assert_eq!(line.total_amount.amount(), dec!(2360));
        assert_eq!(line.split.cgst(), Some(Money::new(dec!(180))));
        assert_eq!(line.split.sgst(), Some(Money::new(dec!(180))));
        assert_eq!(line.split.igst(), None);
        assert_eq!(totals.grand_total.amount(), dec!(2360));
    }

    #[test]
    fn test_single_item_inter_state() {
        let totals = compute_totals(&[item(dec!(1000), 2, dec!(0))], "27", "29").unwrap();
        let line = &totals.items[0];

        assert_eq!(line.split.igst(), Some(Money::new(dec!(360))));
        assert_eq!(line.split.cgst(), None);
        assert_eq!(line.split.sgst(), None);
        assert_eq!(totals.grand_total.amount(), dec!(2360));
    }

    #[test]
    fn test_discount_reduces_net() {
        let totals = compute_totals(&[item(dec!(499.99), 3, dec!(100))], "07", "07").unwrap();
        let line = &totals.items[0];

        // 1499.97 - 100 = 1399.97; 18% = 251.9946
        assert_eq!(line.net_amount.amount(), dec!(1399.97));
        assert_eq!(line.tax_amount.amount(), dec!(251.9946));
        assert_eq!(line.split.cgst(), Some(Money::new(dec!(125.9973))));
        assert_eq!(line.total_amount.amount(), dec!(1651.9646));
    }

    #[test]
    fn test_aggregates_sum_items_in_order() {
        let items = vec![
            item(dec!(100), 1, dec!(0)),
            item(dec!(250.50), 4, dec!(2)),
            item(dec!(0.01), 7, dec!(0)),
        ];
        let totals = compute_totals(&items, "27", "29").unwrap();

        assert_eq!(totals.items.len(), 3);
        assert_eq!(totals.total_net_amount.amount(), dec!(1100.07));
        assert_eq!(totals.total_tax_amount.amount(), dec!(198.0126));
        assert_eq!(totals.grand_total.amount(), dec!(1298.0826));
        assert_eq!(totals.items[1].item.quantity, 4);
    }

    #[test]
    fn test_input_items_are_not_mutated() {
        let items = vec![item(dec!(10), 1, dec!(0))];
        let before = items.clone();
        let _ = compute_totals(&items, "27", "27");
        assert_eq!(items, before);
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let totals = compute_totals(&[item(dec!(1000), 2, dec!(0))], "27", "27").unwrap();
        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(json["totalNetAmount"], 2000.0);
        assert_eq!(json["totalTaxAmount"], 360.0);
        assert_eq!(json["grandTotal"], 2360.0);
        assert_eq!(json["items"][0]["cgst"], 180.0);
    }

    #[test]
    fn test_overflowing_line_names_the_item() {
        let price = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        let items = vec![
            item(dec!(10), 1, dec!(0)),
            item(price, 1_000_000_000_000_000, dec!(0)),
        ];

        let err = compute_totals(&items, "27", "27").unwrap_err();
        assert!(matches!(
            &err,
            InvoiceError::AmountOverflow { field } if field == "items[1].netAmount"
        ));
    }

    #[test]
    fn test_overflowing_tax_is_reported() {
        let net = Decimal::from_i128_with_scale(5 * 10i128.pow(27), 0);
        let err = compute_totals(&[item(net, 1, dec!(0))], "27", "29").unwrap_err();
        assert_eq!(err.to_string(), "items[0].taxAmount is too large to compute");
    }

    #[test]
    fn test_overflowing_aggregate_is_reported() {
        // each line fits, twenty of them do not
        let price = Decimal::from_i128_with_scale(4 * 10i128.pow(27), 0);
        let items = vec![item(price, 1, dec!(0)); 20];

        let err = compute_totals(&items, "27", "27").unwrap_err();
        assert!(matches!(
            &err,
            InvoiceError::AmountOverflow { field } if field == "totalNetAmount"
        ));
    }
}
