//! Budget parsing for free-text messages: "40-60k", "₹40k to ₹60k",
//! "40000-60000", "60k", "1.2 lakh".
//!
//! All values are normalized to thousands of rupees.

use once_cell::sync::Lazy;
use regex::Regex;

/// Single mentions are widened by this much on each side
const WINDOW_K: u32 = 10;
/// Lower bound of a widened single mention
const FLOOR_K: u32 = 20;

static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(₹?\s*\d[\d,]*(?:\.\d+)?\s*(?:k|lakh|l)?)\s*(?:-|to)\s*(₹?\s*\d[\d,]*(?:\.\d+)?\s*(?:k|lakh|l)?)",
    )
    .expect("range pattern compiles")
});

static SINGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"₹?\s*(\d[\d,]*(?:\.\d+)?)\s*(k|lakh|l)\b").expect("single pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Explicit range, stored sorted
    Range { min_k: u32, max_k: u32 },
    /// One amount widened to a window around it
    Around { k: u32, min_k: u32, max_k: u32 },
}

impl Budget {
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Self::Range { min_k, max_k } | Self::Around { min_k, max_k, .. } => (min_k, max_k),
        }
    }

    pub fn summary(&self) -> String {
        match *self {
            Self::Range { min_k, max_k } => format!("Budget: ₹{min_k}k–₹{max_k}k"),
            Self::Around { k, .. } => format!("Budget: ~₹{k}k"),
        }
    }
}

/// Parse a budget from lowercased text.
///
/// A range wins over a single amount. When the first range-looking match
/// fails to normalize, no budget is produced at all.
pub fn parse_budget(q: &str) -> Option<Budget> {
    if let Some(caps) = RANGE.captures(q) {
        let a = to_thousands(&caps[1])?;
        let b = to_thousands(&caps[2])?;
        return Some(Budget::Range {
            min_k: a.min(b),
            max_k: a.max(b),
        });
    }

    let caps = SINGLE.captures(q)?;
    let k = to_thousands(&format!("{}{}", &caps[1], &caps[2]))?;
    let min_k = k.saturating_sub(WINDOW_K).max(FLOOR_K);
    Some(Budget::Around {
        k,
        min_k,
        max_k: k.saturating_add(WINDOW_K).max(min_k),
    })
}

/// Normalize one amount token to thousands.
///
/// "l"/"lakh" multiplies by 100, "k" is taken as is, a bare number of 1000
/// or more is read as rupees, anything smaller as already in thousands.
pub fn to_thousands(raw: &str) -> Option<u32> {
    let r: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| *c != ',' && *c != '₹' && !c.is_whitespace())
        .collect();

    let value = if r.ends_with('l') || r.contains("lakh") {
        parse_number(&r.replace("lakh", "").replace('l', ""))? * 100.0
    } else if let Some(n) = r.strip_suffix('k') {
        parse_number(n)?
    } else {
        let n = parse_number(&r)?;
        if n >= 1000.0 {
            n / 1000.0
        } else {
            n
        }
    };

    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
