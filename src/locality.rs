//! Suburb-scoped gazetteer of landmarks and neighbourhoods.
//!
//! Lists are grouped by suburb, not by side: East and West share one list.

use crate::models::{Area, Suburb};

/// Maximum number of typeahead suggestions
pub const MAX_SUGGESTIONS: usize = 8;

const MALAD: &[&str] = &[
    "Mindspace",
    "Link Road",
    "SV Road",
    "Malad Station",
    "Malad Metro",
    "Marve Road",
    "Orlem",
    "Evershine Nagar",
    "Chincholi Bunder",
    "Inorbit / Infiniti",
    "Dindoshi",
    "Madh",
];

const KANDIVALI: &[&str] = &[
    "Thakur Village",
    "Mahavir Nagar",
    "Lokhandwala (Kandivali)",
    "Charkop",
    "Poisar",
    "Kandivali Station",
    "Kandivali Metro",
    "Akurli Road",
    "Samta Nagar",
    "Shankar Lane",
    "Link Road",
    "SV Road",
];

const BORIVALI: &[&str] = &[
    "IC Colony",
    "Eksar",
    "Shimpoli",
    "Gorai",
    "Borivali Station",
    "Borivali Metro",
    "Devipada",
    "National Park",
    "Chandavarkar Road",
    "LT Road",
    "Link Road",
    "SV Road",
];

pub fn localities_for_suburb(suburb: Suburb) -> &'static [&'static str] {
    match suburb {
        Suburb::Malad => MALAD,
        Suburb::Kandivali => KANDIVALI,
        Suburb::Borivali => BORIVALI,
    }
}

/// Fixed locality list for the suburb the area belongs to
pub fn localities_for(area: Area) -> &'static [&'static str] {
    localities_for_suburb(area.suburb())
}

/// Typeahead filtering: case-insensitive substring match, capped at
/// [`MAX_SUGGESTIONS`]. A blank query returns the head of the list.
pub fn suggest(area: Area, query: &str) -> Vec<&'static str> {
    let q = query.trim().to_lowercase();
    localities_for(area)
        .iter()
        .copied()
        .filter(|loc| q.is_empty() || loc.to_lowercase().contains(&q))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Find a known locality inside free text.
///
/// With an area only that suburb's list is searched; otherwise all suburbs in
/// their fixed order. Matching is plain substring containment, so a locality
/// name embedded in a longer unrelated word still matches.
pub fn detect_locality(text: &str, area: Option<Area>) -> Option<&'static str> {
    let t = text.to_lowercase();
    if t.trim().is_empty() {
        return None;
    }

    let scoped;
    let suburbs: &[Suburb] = match area {
        Some(area) => {
            scoped = [area.suburb()];
            &scoped
        }
        None => &Suburb::ALL,
    };

    suburbs
        .iter()
        .flat_map(|s| localities_for_suburb(*s).iter().copied())
        .find(|loc| t.contains(&loc.to_lowercase()))
}

/// Whether `locality` names an entry of the area's list (trimmed, case-insensitive)
pub fn is_locality_of(area: Area, locality: &str) -> bool {
    let wanted = locality.trim().to_lowercase();
    localities_for(area)
        .iter()
        .any(|loc| loc.to_lowercase() == wanted)
}
