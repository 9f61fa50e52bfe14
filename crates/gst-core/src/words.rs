//! # Amount in Words
//!
//! Spells a whole rupee amount in the Indian numbering system.
//!
//! ## Grouping
//! ```text
//! 1,23,45,678  →  One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight
//! │ │  │  └── below one thousand (no suffix)
//! │ │  └───── Thousand  (1,000)
//! │ └──────── Lakh      (1,00,000)
//! └────────── Crore     (1,00,00,000)
//! ```

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

pub const CRORE: u64 = 10_000_000;
pub const LAKH: u64 = 100_000;
pub const THOUSAND: u64 = 1_000;

/// Converts a non-negative whole amount to words.
///
/// Zero is the literal `"Zero"`. Non-zero groups are emitted largest first
/// and joined with single spaces.
///
/// ## Example
/// ```rust
/// use gst_core::words::to_words;
///
/// assert_eq!(to_words(2360), "Two Thousand Three Hundred Sixty");
/// assert_eq!(
///     to_words(1_234_567),
///     "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven"
/// );
/// ```
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut parts = Vec::new();
    let mut rest = amount;

    if rest >= CRORE {
        let crores = rest / CRORE;
        // 1000+ crore: spell the crore count with the same grouping.
        let count = if crores < THOUSAND {
            below_thousand(crores)
        } else {
            to_words(crores)
        };
        parts.push(format!("{count} Crore"));
        rest %= CRORE;
    }
    if rest >= LAKH {
        parts.push(format!("{} Lakh", below_thousand(rest / LAKH)));
        rest %= LAKH;
    }
    if rest >= THOUSAND {
        parts.push(format!("{} Thousand", below_thousand(rest / THOUSAND)));
        rest %= THOUSAND;
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Words for 0..=999. Zero yields an empty string.
fn below_thousand(n: u64) -> String {
    debug_assert!(n < THOUSAND);
    let n = n as usize;

    if n < 10 {
        ONES[n].to_string()
    } else if n < 20 {
        TEENS[n - 10].to_string()
    } else if n < 100 {
        if n % 10 == 0 {
            TENS[n / 10].to_string()
        } else {
            format!("{} {}", TENS[n / 10], ONES[n % 10])
        }
    } else if n % 100 == 0 {
        format!("{} Hundred", ONES[n / 100])
    } else {
        format!("{} Hundred {}", ONES[n / 100], below_thousand((n % 100) as u64))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
