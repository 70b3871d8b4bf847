//! One rule per preference dimension. Every rule reads the whole message
//! and knows nothing about the others.

use crate::models::{Area, Bhk, Furnishing, MoveIn, Profile, Side, Suburb};
use once_cell::sync::Lazy;
use regex::Regex;

/// Notes are cut to this many characters
pub const MAX_NOTES_CHARS: usize = 200;

static BHK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([12])\s*(?:bhk|b|bed)\b").expect("bhk pattern compiles"));

static NOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bnotes?\s*:\s*(.+)$").expect("notes pattern compiles"));

static SEVEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)7(?:\D|$)").expect("seven pattern compiles"));

static FIFTEEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)15(?:\D|$)").expect("fifteen pattern compiles"));

const DAY_WORDS: &[&str] = &["day", "days", "within"];

/// Outcome of looking for an area in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaMatch {
    Found(Area),
    /// Suburbs mentioned without East/West
    MissingSide(Vec<Suburb>),
    None,
}

pub fn has_any(hay: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| hay.contains(n))
}

/// Alphanumeric words of already-lowercased text
pub fn tokens(q: &str) -> impl Iterator<Item = &str> {
    q.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty())
}

fn has_token(q: &str, wanted: &[&str]) -> bool {
    tokens(q).any(|t| wanted.contains(&t))
}

pub fn area(q: &str) -> AreaMatch {
    let Some(suburb) = Suburb::ALL.into_iter().find(|s| q.contains(s.keyword())) else {
        return AreaMatch::None;
    };

    let side = if q.contains("west") || has_token(q, &["w"]) {
        Some(Side::West)
    } else if q.contains("east") || has_token(q, &["e"]) {
        Some(Side::East)
    } else {
        None
    };

    match side {
        Some(side) => AreaMatch::Found(Area::new(suburb, side)),
        None => AreaMatch::MissingSide(
            Suburb::ALL
                .into_iter()
                .filter(|s| q.contains(s.keyword()))
                .collect(),
        ),
    }
}

/// Only 1 and 2 BHK are recognized in free text
pub fn bhk(q: &str) -> Option<Bhk> {
    if let Some(caps) = BHK.captures(q) {
        return match &caps[1] {
            "1" => Some(Bhk::One),
            _ => Some(Bhk::Two),
        };
    }
    if q.contains("1bhk") {
        Some(Bhk::One)
    } else if q.contains("2bhk") {
        Some(Bhk::Two)
    } else {
        None
    }
}

/// Furnished > Semi-furnished > Unfurnished.
///
/// "furnished" counts as fully furnished only when it is not part of
/// "semi furnished" or "unfurnished". With plain substring sets checked in
/// priority order, "semi-furnished" would read as Furnished and the lower
/// sets could never win.
pub fn furnishing(q: &str) -> Option<Furnishing> {
    let words: Vec<&str> = tokens(q).collect();
    let plain_furnished = words
        .iter()
        .enumerate()
        .any(|(i, w)| *w == "furnished" && (i == 0 || !matches!(words[i - 1], "semi" | "un")));

    if plain_furnished || has_any(q, &["fully furnished", "full furnished"]) {
        Some(Furnishing::Furnished)
    } else if has_any(q, &["semi", "semi-furnished", "semi furnished"]) {
        Some(Furnishing::SemiFurnished)
    } else if has_any(q, &["unfurnished", "un-furnished"]) {
        Some(Furnishing::Unfurnished)
    } else {
        None
    }
}

/// Family > Bachelor > Company
pub fn profile(q: &str) -> Option<Profile> {
    if q.contains("family") {
        Some(Profile::Family)
    } else if has_any(q, &["bachelor", "single", "boys", "girls"]) {
        Some(Profile::Bachelor)
    } else if has_any(q, &["company", "corporate"]) {
        Some(Profile::Company)
    } else {
        None
    }
}

/// Immediate > 7 days > 15 days > 30+
///
/// 7 and 15 must stand as numbers on their own ("75k" is not a 7).
pub fn move_in(q: &str) -> Option<MoveIn> {
    if has_any(q, &["immediate", "today", "asap"]) {
        Some(MoveIn::Immediate)
    } else if SEVEN.is_match(q) && has_any(q, DAY_WORDS) {
        Some(MoveIn::Within7Days)
    } else if FIFTEEN.is_match(q) && has_any(q, DAY_WORDS) {
        Some(MoveIn::Within15Days)
    } else if has_any(q, &["30", "month", "1 month", "one month", "30+"]) {
        Some(MoveIn::ThirtyPlusDays)
    } else {
        None
    }
}

/// Text after an explicit "note:"/"notes:" marker in the original message
pub fn notes(original: &str) -> Option<String> {
    let caps = NOTES.captures(original)?;
    let note: String = caps[1].trim().chars().take(MAX_NOTES_CHARS).collect();
    (!note.is_empty()).then_some(note)
}
