use super::{Area, Bhk, Furnishing, MoveIn, Profile};
use serde::{Deserialize, Serialize};

/// A visitor's in-progress rental request, shared by every surface that edits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPreferenceDraft {
    pub name: Option<String>,
    /// Digits only
    pub phone: Option<String>,
    pub area: Option<Area>,
    pub budget_min_k: Option<u32>,
    pub budget_max_k: Option<u32>,
    pub bhk: Option<Bhk>,
    pub furnishing: Option<Furnishing>,
    pub move_in: Option<MoveIn>,
    pub profile: Option<Profile>,
    pub locality: Option<String>,
    pub notes: Option<String>,
    /// Milliseconds of the latest URL/chat write, strictly increasing within a session
    pub prefill_ts: Option<i64>,
}

impl Default for RentalPreferenceDraft {
    fn default() -> Self {
        Self {
            name: None,
            phone: None,
            area: Some(Area::MaladWest),
            budget_min_k: Some(40),
            budget_max_k: Some(60),
            bhk: Some(Bhk::One),
            furnishing: Some(Furnishing::SemiFurnished),
            move_in: Some(MoveIn::Immediate),
            profile: Some(Profile::Family),
            locality: Some(String::new()),
            notes: Some(String::new()),
            prefill_ts: None,
        }
    }
}

impl RentalPreferenceDraft {
    /// Shallow-merge a patch; keys absent from the patch keep their value.
    ///
    /// Budget bounds stay ordered: a one-sided update drags the other bound
    /// along, a two-sided update is stored sorted.
    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            area,
            locality,
            bhk,
            furnishing,
            profile,
            move_in,
            budget_min_k,
            budget_max_k,
            notes,
            name,
            phone,
        } = patch;

        if area.is_some() {
            self.area = area;
        }
        if locality.is_some() {
            self.locality = locality;
        }
        if bhk.is_some() {
            self.bhk = bhk;
        }
        if furnishing.is_some() {
            self.furnishing = furnishing;
        }
        if profile.is_some() {
            self.profile = profile;
        }
        if move_in.is_some() {
            self.move_in = move_in;
        }
        if notes.is_some() {
            self.notes = notes;
        }
        if name.is_some() {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = Some(only_digits(&phone));
        }

        match (budget_min_k, budget_max_k) {
            (Some(min), Some(max)) => {
                self.budget_min_k = Some(min.min(max));
                self.budget_max_k = Some(min.max(max));
            }
            (Some(min), None) => {
                self.budget_min_k = Some(min);
                if self.budget_max_k.is_some_and(|max| max < min) {
                    self.budget_max_k = Some(min);
                }
            }
            (None, Some(max)) => {
                self.budget_max_k = Some(max);
                if self.budget_min_k.is_some_and(|min| min > max) {
                    self.budget_min_k = Some(max);
                }
            }
            (None, None) => {}
        }
    }

    /// Locality with surrounding whitespace removed, `None` when blank
    pub fn locality_trimmed(&self) -> Option<&str> {
        self.locality
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// Partial update to a [`RentalPreferenceDraft`].
///
/// The key set is closed: deserializing a patch with any other key fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bhk: Option<Bhk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<Furnishing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_in: Option<MoveIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_min_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_max_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl DraftPatch {
    /// True when at least one key is set
    pub fn is_meaningful(&self) -> bool {
        *self != Self::default()
    }
}

pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strip everything but digits; valid only if exactly 10 remain
pub fn normalize_phone(value: &str) -> Option<String> {
    let digits = only_digits(value);
    (digits.len() == 10).then_some(digits)
}
