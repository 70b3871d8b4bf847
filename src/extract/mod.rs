//! Free-text preference extraction for the chat assistant.
//!
//! Turns a message like "2bhk in malad west, 40-60k, family" into a
//! [`DraftPatch`] plus human-readable summary lines the visitor confirms
//! before anything touches the shared draft.

pub mod budget;
pub mod rules;

use crate::locality::detect_locality;
use crate::models::{Area, DraftPatch, MoveIn};
use rules::AreaMatch;
use serde::Serialize;
use tracing::debug;

/// Result of parsing one message
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub patch: DraftPatch,
    pub summary: Vec<String>,
}

impl Extraction {
    pub fn is_meaningful(&self) -> bool {
        self.patch.is_meaningful()
    }
}

/// Extract preferences from a message. Never fails: dimensions that are
/// not recognized are simply absent from the patch.
pub fn extract(text: &str) -> Extraction {
    extract_with_area(text, None)
}

/// Like [`extract`], with the area already held by the draft used to scope
/// locality detection when the message itself names no area.
pub fn extract_with_area(text: &str, draft_area: Option<Area>) -> Extraction {
    let q = text.trim().to_lowercase();
    let mut patch = DraftPatch::default();
    let mut summary = Vec::new();

    match rules::area(&q) {
        AreaMatch::Found(area) => {
            patch.area = Some(area);
            summary.push(format!("Area: {area}"));
        }
        AreaMatch::MissingSide(suburbs) => {
            for suburb in suburbs {
                summary.push(format!("Area: {suburb} (East/West?)"));
            }
        }
        AreaMatch::None => {}
    }

    if let Some(bhk) = rules::bhk(&q) {
        patch.bhk = Some(bhk);
        summary.push(format!("{}BHK", bhk.as_str()));
    }

    if let Some(furnishing) = rules::furnishing(&q) {
        patch.furnishing = Some(furnishing);
        summary.push(furnishing.label().to_string());
    }

    if let Some(profile) = rules::profile(&q) {
        patch.profile = Some(profile);
        summary.push(format!("Profile: {}", profile.as_str()));
    }

    if let Some(move_in) = rules::move_in(&q) {
        patch.move_in = Some(move_in);
        summary.push(match move_in {
            MoveIn::Within7Days | MoveIn::Within15Days => {
                format!("Move-in: {} days", move_in.code())
            }
            _ => format!("Move-in: {}", move_in.code()),
        });
    }

    if let Some(budget) = budget::parse_budget(&q) {
        let (min_k, max_k) = budget.bounds();
        patch.budget_min_k = Some(min_k);
        patch.budget_max_k = Some(max_k);
        summary.push(budget.summary());
    }

    if let Some(notes) = rules::notes(text) {
        patch.notes = Some(notes);
        summary.push("Added note".to_string());
    }

    if let Some(locality) = detect_locality(text, patch.area.or(draft_area)) {
        patch.locality = Some(locality.to_string());
        summary.push(format!("Locality: {locality}"));
    }

    debug!(patch = ?patch, fragments = summary.len(), "extracted preferences");

    Extraction { patch, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bhk, Furnishing, Profile};

    #[test]
    fn test_full_sentence() {
        let result = extract("Looking for 2bhk in malad west, budget 40-60k, family");
        let expected = DraftPatch {
            area: Some(Area::MaladWest),
            bhk: Some(Bhk::Two),
            budget_min_k: Some(40),
            budget_max_k: Some(60),
            profile: Some(Profile::Family),
            ..Default::default()
        };
        assert_eq!(result.patch, expected);
        assert!(!result.summary.is_empty());
        assert!(result.summary.contains(&"Area: Malad West".to_string()));
        assert!(result.summary.contains(&"Budget: ₹40k–₹60k".to_string()));
    }

    #[test]
    fn test_suburb_without_side_hints() {
        let result = extract("malad");
        assert_eq!(result.patch.area, None);
        assert!(result.summary.iter().any(|s| s.contains("East/West")));
        assert!(!result.is_meaningful());
    }

    #[test]
    fn test_nothing_recognized() {
        let result = extract("hello");
        assert!(!result.is_meaningful());
        assert!(result.summary.is_empty());
    }

    #[test]
    fn test_budget_variants() {
        for text in ["40-60k", "40k-60k", "₹40k to ₹60k", "60-40k"] {
            let patch = extract(text).patch;
            assert_eq!((patch.budget_min_k, patch.budget_max_k), (Some(40), Some(60)), "{text}");
        }

        let patch = extract("60k").patch;
        assert_eq!((patch.budget_min_k, patch.budget_max_k), (Some(50), Some(70)));

        let patch = extract("25k").patch;
        assert_eq!(patch.budget_min_k, Some(20));

        for text in ["upto 1 lakh", "1l max"] {
            let patch = extract(text).patch;
            assert_eq!((patch.budget_min_k, patch.budget_max_k), (Some(90), Some(110)), "{text}");
        }
    }

    #[test]
    fn test_mixed_dimensions() {
        let result = extract("Semi furnished 1 bed, bachelor, within 7 days");
        assert_eq!(result.patch.bhk, Some(Bhk::One));
        assert_eq!(result.patch.furnishing, Some(Furnishing::SemiFurnished));
        assert_eq!(result.patch.profile, Some(Profile::Bachelor));
        assert_eq!(result.patch.move_in, Some(MoveIn::Within7Days));
        assert!(result.summary.contains(&"Move-in: 7 days".to_string()));
    }

    #[test]
    fn test_notes_keep_original_case() {
        let result = extract("1bhk. Note: Need Parking for 2 cars");
        assert_eq!(result.patch.notes.as_deref(), Some("Need Parking for 2 cars"));
        assert!(result.summary.contains(&"Added note".to_string()));
    }

    #[test]
    fn test_locality_scoped_by_message_area() {
        let result = extract("kandivali east near Thakur Village");
        assert_eq!(result.patch.area, Some(Area::KandivaliEast));
        assert_eq!(result.patch.locality.as_deref(), Some("Thakur Village"));

        let result = extract("borivali west near Thakur Village");
        assert_eq!(result.patch.locality, None);
    }

    #[test]
    fn test_locality_scoped_by_draft_area() {
        let result = extract_with_area("close to mindspace", Some(Area::MaladEast));
        assert_eq!(result.patch.locality.as_deref(), Some("Mindspace"));

        let result = extract_with_area("close to mindspace", Some(Area::BorivaliEast));
        assert_eq!(result.patch.locality, None);
    }

    #[test]
    fn test_locality_unscoped() {
        let result = extract("anything near IC Colony?");
        assert_eq!(result.patch.locality.as_deref(), Some("IC Colony"));
        assert!(result.is_meaningful());
    }
}
