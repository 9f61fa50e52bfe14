//! # Domain Types
//!
//! Core domain types for a GST invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         InvoicePayload                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SellerDetails   │   │  PartyDetails   │   │  OrderDetails   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  pincode        │   │  billing and    │   │  orderNo        │       │
//! │  │  panNo          │   │  shipping,      │   │  orderDate      │       │
//! │  │  gstRegNo       │   │  stateCode      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InvoiceDetails  │   │    LineItem     │   │ComputedLineItem │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoiceNo      │   │  unitPrice      │──►│  net/tax/total  │       │
//! │  │  reverseCharge  │   │  quantity       │   │  TaxSplit       │       │
//! │  └─────────────────┘   │  discount, rate │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase to match the incoming JSON payload.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a whole percentage (18 = 18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TaxRate {
    /// The 18% GST slab, the only rate accepted by validation.
    pub const GST_18: TaxRate = TaxRate(Decimal::from_parts(18, 0, 0, false, 0));

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }
}

// =============================================================================
// Parties
// =============================================================================

/// The selling business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Six-digit postal code.
    pub pincode: String,
    /// Permanent Account Number (`AAAAA9999A`).
    pub pan_no: String,
    pub gst_registration_no: String,
}

/// A billing or shipping party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// GST state code, one or two digits.
    pub state_code: String,
}

// =============================================================================
// Order / Invoice Details
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_no: String,
    pub order_date: IsoDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    pub invoice_no: String,
    /// Free-text detail line printed under the invoice number.
    pub invoice_details: String,
    pub invoice_date: IsoDate,
    pub reverse_charge: ReverseCharge,
}

/// Whether tax is payable on reverse charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReverseCharge {
    Yes,
    No,
}

impl ReverseCharge {
    /// The literal wire values, in schema order.
    pub const ALLOWED: [&'static str; 2] = ["Yes", "No"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReverseCharge::Yes => "Yes",
            ReverseCharge::No => "No",
        }
    }
}

/// An ISO-8601 date or date-time, kept as the caller wrote it.
///
/// Serializes back to the original text, so time and offset survive into
/// the render model. [`IsoDate::date`] is the calendar date the text names,
/// read in its own offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate {
    raw: String,
    date: NaiveDate,
}

impl IsoDate {
    /// Parses `raw`, or `None` when it is not an ISO-8601 date.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_iso_date(raw).map(|date| IsoDate {
            raw: raw.to_string(),
            date,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        IsoDate::parse(&raw).ok_or_else(|| DeError::custom(format!("invalid ISO-8601 date: {raw}")))
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// One billable row as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    #[serde(deserialize_with = "money")]
    pub unit_price: Money,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: u64,
    /// Flat discount on the line, defaults to zero.
    #[serde(default, deserialize_with = "money")]
    pub discount: Money,
    #[serde(deserialize_with = "tax_rate")]
    pub tax_rate: TaxRate,
}

/// How an item's tax is divided between the tax heads.
///
/// ## Split Rule
/// ```text
/// placeOfSupply == placeOfDelivery  →  Intra { cgst: tax/2, sgst: tax/2 }
/// placeOfSupply != placeOfDelivery  →  Inter { igst: tax }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaxSplit {
    /// Intra-state supply: central and state halves.
    Intra { cgst: Money, sgst: Money },
    /// Inter-state supply: integrated tax.
    Inter { igst: Money },
}

impl TaxSplit {
    /// Applies the split rule. Location codes are compared as opaque strings.
    pub fn for_places(tax_amount: Money, place_of_supply: &str, place_of_delivery: &str) -> Self {
        if place_of_supply == place_of_delivery {
            let half = tax_amount.half();
            TaxSplit::Intra {
                cgst: half,
                sgst: half,
            }
        } else {
            TaxSplit::Inter { igst: tax_amount }
        }
    }

    pub fn cgst(&self) -> Option<Money> {
        match self {
            TaxSplit::Intra { cgst, .. } => Some(*cgst),
            TaxSplit::Inter { .. } => None,
        }
    }

    pub fn sgst(&self) -> Option<Money> {
        match self {
            TaxSplit::Intra { sgst, .. } => Some(*sgst),
            TaxSplit::Inter { .. } => None,
        }
    }

    pub fn igst(&self) -> Option<Money> {
        match self {
            TaxSplit::Intra { .. } => None,
            TaxSplit::Inter { igst } => Some(*igst),
        }
    }
}

/// A line item enriched with its derived amounts.
///
/// Serializes flat: the original item fields, then `netAmount`,
/// `taxAmount`, `totalAmount`, then either `cgst`+`sgst` or `igst`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLineItem {
    #[serde(flatten)]
    pub item: LineItem,
    pub net_amount: Money,
    pub tax_amount: Money,
    pub total_amount: Money,
    #[serde(flatten)]
    pub split: TaxSplit,
}

// =============================================================================
// Invoice Payload (aggregate root)
// =============================================================================

/// A validated invoice request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub seller_details: SellerDetails,
    pub place_of_supply: String,
    pub billing_details: PartyDetails,
    pub shipping_details: PartyDetails,
    pub place_of_delivery: String,
    pub order_details: OrderDetails,
    pub invoice_details: InvoiceDetails,
    pub items: Vec<LineItem>,
    /// URI of the authorised signatory's signature image.
    pub signature_image: String,
    /// URI of the company logo.
    pub company_logo: String,
}

// =============================================================================
// Parsing Helpers
// =============================================================================

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<year>[0-9]{4})",
        r"(?:-(?P<month>[0-9]{2})",
        r"(?:-(?P<day>[0-9]{2})",
        r"(?:[T ](?P<hour>[0-9]{2}):(?P<minute>[0-9]{2})",
        r"(?::(?P<second>[0-9]{2})(?:[.,][0-9]+)?)?",
        r"(?:Z|[+-](?P<zone_hour>[0-9]{2}):?(?P<zone_minute>[0-9]{2}))?",
        r")?)?)?$",
    ))
    .expect("ISO date pattern compiles")
});

static NUMERIC_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?\s*$")
        .expect("numeric text pattern compiles")
});

/// Parses an ISO-8601 date or date-time, keeping the calendar date.
///
/// ## Accepted Forms
/// ```text
/// 2024                      year (January 1st)
/// 2024-03                   year-month (the 1st)
/// 2024-03-15                calendar date
/// 2024-03-15T10:30          date-time, seconds optional
/// 2024-03-15 10:30:00       space instead of `T`
/// 2024-03-15T10:30:00.250   fractional seconds (`.` or `,`)
/// ...Z  ...+05:30  ...+0530 UTC or numeric offset
/// ```
///
/// Every component is range-checked: `2024-02-30` and `T25:00` are rejected.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(value)?;
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.name("year")?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number("month").unwrap_or(1), number("day").unwrap_or(1))?;

    if let Some(hour) = number("hour") {
        NaiveTime::from_hms_opt(hour, number("minute")?, number("second").unwrap_or(0))?;
    }
    if let Some(zone_hour) = number("zone_hour") {
        if zone_hour > 23 || number("zone_minute")? > 59 {
            return None;
        }
    }

    Some(date)
}

/// Reads a number written as text, e.g. `"1000"`, `" 2.5 "` or `"1e3"`.
///
/// `None` for anything else, including blanks, `"Infinity"` and `"NaN"`.
pub fn parse_numeric_text(value: &str) -> Option<f64> {
    if !NUMERIC_TEXT.is_match(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Exact decimal for a number in JSON or numeric-text form.
fn decimal_from_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };

    let lead = if mantissa.starts_with('.') { "0" } else { "" };
    let trail = if mantissa.ends_with('.') { "0" } else { "" };
    let mantissa = format!("{sign}{lead}{mantissa}{trail}");

    match exponent {
        Some(exponent) => Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok(),
        None => Decimal::from_str(&mantissa).ok(),
    }
}

/// A JSON number, or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

fn numeric<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match NumericInput::deserialize(deserializer)? {
        NumericInput::Number(number) => number.to_string(),
        NumericInput::Text(text) if parse_numeric_text(&text).is_some() => text,
        NumericInput::Text(text) => {
            return Err(DeError::custom(format!("expected a number, got {text:?}")))
        }
    };
    decimal_from_text(&text).ok_or_else(|| DeError::custom(format!("{text} is out of range")))
}

fn money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    numeric(deserializer).map(Money::new)
}

fn tax_rate<'de, D>(deserializer: D) -> Result<TaxRate, D::Error>
where
    D: Deserializer<'de>,
{
    numeric(deserializer).map(TaxRate)
}

/// Accepts `2`, `2.0` and `"2"` alike; rejects fractions and negatives.
fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = numeric(deserializer)?;
    if !raw.fract().is_zero() || raw.is_sign_negative() {
        return Err(DeError::custom(format!("expected a whole number, got {raw}")));
    }
    raw.to_u64()
        .ok_or_else(|| DeError::custom(format!("{raw} is too large for a quantity")))
}

// =============================================================================
// Unit Tests
// =============================================================================
