//! Plain-text invoice renderer.
//!
//! Amounts are rounded to paise here and only here; the render model keeps
//! full precision.

use std::fmt::{self, Write};

use gst_core::{ComputedLineItem, DocumentRenderer, Money, PartyDetails, RenderModel};

const RULE_WIDTH: usize = 96;

/// Renders an invoice as a fixed-width text document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    type Error = fmt::Error;

    fn render(&self, model: &RenderModel) -> Result<Vec<u8>, Self::Error> {
        let mut out = String::new();
        write_invoice(&mut out, model)?;
        Ok(out.into_bytes())
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

fn write_invoice(out: &mut String, model: &RenderModel) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let thin_rule = "-".repeat(RULE_WIDTH);

    writeln!(out, "{:^width$}", "TAX INVOICE", width = RULE_WIDTH)?;
    writeln!(out, "{rule}")?;

    let seller = &model.seller_details;
    writeln!(out, "Sold By: {}", seller.name)?;
    writeln!(
        out,
        "         {}, {}, {} - {}",
        seller.address, seller.city, seller.state, seller.pincode
    )?;
    writeln!(out, "         PAN: {}  GSTIN: {}", seller.pan_no, seller.gst_registration_no)?;
    writeln!(out)?;

    write_party(out, "Billing Address", &model.billing_details)?;
    write_party(out, "Shipping Address", &model.shipping_details)?;

    let order = &model.order_details;
    let invoice = &model.invoice_details;
    writeln!(out, "Order No: {}  Order Date: {}", order.order_no, order.order_date)?;
    writeln!(
        out,
        "Invoice No: {}  Invoice Date: {}",
        invoice.invoice_no, invoice.invoice_date
    )?;
    writeln!(out, "Invoice Details: {}", invoice.invoice_details)?;
    writeln!(
        out,
        "Place of Supply: {}  Place of Delivery: {}",
        model.place_of_supply, model.place_of_delivery
    )?;
    writeln!(out, "Reverse Charge: {}", invoice.reverse_charge.as_str())?;
    writeln!(out, "{thin_rule}")?;

    if model.is_intra_state() {
        writeln!(
            out,
            "{:<3} {:<24} {:>12} {:>5} {:>10} {:>12} {:>10} {:>10}",
            "#", "Description", "Unit Price", "Qty", "Discount", "Net Amount", "CGST 9%", "SGST 9%"
        )?;
    } else {
        writeln!(
            out,
            "{:<3} {:<24} {:>12} {:>5} {:>10} {:>12} {:>10}",
            "#", "Description", "Unit Price", "Qty", "Discount", "Net Amount", "IGST 18%"
        )?;
    }
    writeln!(out, "{thin_rule}")?;

    for (index, line) in model.items.iter().enumerate() {
        write_line(out, index + 1, line)?;
    }
    writeln!(out, "{thin_rule}")?;

    writeln!(out, "{:>80} {:>15}", "Total Net Amount:", amount(model.total_net_amount))?;
    writeln!(out, "{:>80} {:>15}", "Total Tax Amount:", amount(model.total_tax_amount))?;
    writeln!(out, "{:>80} {:>15}", "Grand Total:", amount(model.grand_total))?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Amount in Words: {}", model.amount_in_words)?;
    writeln!(out)?;
    writeln!(out, "For {}", seller.name)?;
    writeln!(out, "Authorised Signatory [{}]", model.signature_image)?;

    Ok(())
}

fn write_party(out: &mut String, heading: &str, party: &PartyDetails) -> fmt::Result {
    writeln!(out, "{heading}:")?;
    writeln!(out, "  {}", party.name)?;
    writeln!(
        out,
        "  {}, {}, {} - {}",
        party.address, party.city, party.state, party.pincode
    )?;
    writeln!(out, "  State Code: {}", party.state_code)?;
    writeln!(out)
}

fn write_line(out: &mut String, number: usize, line: &ComputedLineItem) -> fmt::Result {
    let item = &line.item;
    write!(
        out,
        "{:<3} {:<24} {:>12} {:>5} {:>10} {:>12}",
        number,
        truncate(&item.description, 24),
        amount(item.unit_price),
        item.quantity,
        amount(item.discount),
        amount(line.net_amount),
    )?;

    match (line.split.cgst(), line.split.sgst(), line.split.igst()) {
        (Some(cgst), Some(sgst), _) => writeln!(out, " {:>10} {:>10}", amount(cgst), amount(sgst)),
        (_, _, Some(igst)) => writeln!(out, " {:>10}", amount(igst)),
        _ => writeln!(out),
    }
}

fn amount(money: Money) -> String {
    format!("{:.2}", money.round_for_display())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else if max == 0 {
        String::new()
    } else {
        let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(place_of_delivery: &str) -> RenderModel {
        let payload = json!({
            "sellerDetails": {
                "name": "Acme Traders", "address": "12 MG Road", "city": "Pune",
                "state": "Maharashtra", "pincode": "411001", "panNo": "ABCDE1234F",
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
                "invoiceNo": "INV-1", "invoiceDetails": "Against PO-1",
                "invoiceDate": "2024-03-02", "reverseCharge": "No"
            },
            "items": [
                { "description": "Widget", "unitPrice": 333.33, "quantity": 1, "taxRate": 18 }
            ],
            "signatureImage": "https://cdn.example.com/sign.png",
            "companyLogo": "https://cdn.example.com/logo.png"
        });
        gst_core::assemble(&payload).unwrap()
    }

    fn render(model: &RenderModel) -> String {
        String::from_utf8(TextRenderer.render(model).unwrap()).unwrap()
    }

    #[test]
    fn test_intra_state_columns() {
        let text = render(&model("27"));
        assert!(text.contains("CGST 9%"));
        assert!(text.contains("SGST 9%"));
        assert!(!text.contains("IGST"));
        // 59.9994 / 2 = 29.9997 → 30.00 on paper
        assert!(text.contains("30.00"));
    }

    #[test]
    fn test_inter_state_columns() {
        let text = render(&model("29"));
        assert!(text.contains("IGST 18%"));
        assert!(!text.contains("CGST"));
        assert!(text.contains("393.33"));
    }

    #[test]
    fn test_includes_words_and_parties() {
        let text = render(&model("27"));
        assert!(text.contains("Amount in Words: Three Hundred Ninety Three Rupees Only"));
        assert!(text.contains("Billing Address:"));
        assert!(text.contains("Reverse Charge: No"));
        assert_eq!(TextRenderer.file_extension(), "txt");
    }

    #[test]
    fn test_truncate_long_descriptions() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abcdef", 1), "…");
        assert_eq!(truncate("abcdef", 0), "");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_prints_dates_as_written() {
        let mut model = model("27");
        model.invoice_details.invoice_date = gst_core::IsoDate::parse("2024-03-02T09:15:00+05:30").unwrap();

        let text = render(&model);
        assert!(text.contains("Invoice Date: 2024-03-02T09:15:00+05:30"));
    }
}
