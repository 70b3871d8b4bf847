use crate::models::{
    normalize_phone, Area, Bhk, Furnishing, MoveIn, Profile, RentalPreferenceDraft,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Budget bounds accepted by the form, in thousands
pub const BUDGET_RANGE_K: std::ops::RangeInclusive<u32> = 10..=300;
pub const MAX_NOTES_CHARS: usize = 500;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("budget must be between 10k and 300k")]
    BudgetOutOfRange,

    #[error("name must be between 2 and 80 characters")]
    InvalidName,

    #[error("phone must be exactly 10 digits")]
    InvalidPhone,

    #[error("notes too long")]
    NotesTooLong,

    /// The hidden field was filled in, i.e. a bot submitted the form
    #[error("rejected as spam")]
    Honeypot,
}

/// How soon the visitor wants to move, as a follow-up priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadScore {
    Hot,
    Warm,
    Cold,
}

impl LeadScore {
    pub fn from_move_in(move_in: MoveIn) -> Self {
        match move_in {
            MoveIn::Immediate | MoveIn::Within7Days => Self::Hot,
            MoveIn::Within15Days => Self::Warm,
            MoveIn::ThirtyPlusDays => Self::Cold,
        }
    }
}

/// "40-60k", with both bounds rounded to the nearest 5
pub fn budget_range(min_k: u32, max_k: u32) -> String {
    let round5 = |k: u32| ((f64::from(k) / 5.0).round() as u32) * 5;
    format!("{}-{}k", round5(min_k), round5(max_k))
}

/// A validated lead, ready to be handed to the submission API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: String,
    /// 10 digits
    pub phone: String,
    pub area: Area,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    pub budget_min_k: u32,
    pub budget_max_k: u32,
    pub budget_range: String,
    pub bhk: Bhk,
    pub furnishing: Furnishing,
    pub move_in: MoveIn,
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl LeadSubmission {
    /// Validate the draft the way the multi-step form does before submitting.
    ///
    /// `honeypot` is the hidden form field; any content rejects the lead.
    pub fn from_draft(
        draft: &RentalPreferenceDraft,
        honeypot: Option<&str>,
    ) -> Result<Self, LeadError> {
        if honeypot.is_some_and(|hp| !hp.trim().is_empty()) {
            return Err(LeadError::Honeypot);
        }

        let area = draft.area.ok_or(LeadError::Missing("area"))?;
        let min = draft.budget_min_k.ok_or(LeadError::Missing("budget"))?;
        let max = draft.budget_max_k.ok_or(LeadError::Missing("budget"))?;
        if !BUDGET_RANGE_K.contains(&min) || !BUDGET_RANGE_K.contains(&max) {
            return Err(LeadError::BudgetOutOfRange);
        }
        let bhk = draft.bhk.ok_or(LeadError::Missing("BHK"))?;
        let furnishing = draft.furnishing.ok_or(LeadError::Missing("furnishing"))?;
        let move_in = draft.move_in.ok_or(LeadError::Missing("move-in timeline"))?;
        let profile = draft.profile.ok_or(LeadError::Missing("profile"))?;

        let name = draft.name.as_deref().unwrap_or_default().trim();
        let name_len = name.chars().count();
        if !(2..=80).contains(&name_len) {
            return Err(LeadError::InvalidName);
        }

        let phone = draft
            .phone
            .as_deref()
            .and_then(normalize_phone)
            .ok_or(LeadError::InvalidPhone)?;

        let notes = draft
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if notes.is_some_and(|n| n.chars().count() > MAX_NOTES_CHARS) {
            return Err(LeadError::NotesTooLong);
        }

        Ok(Self {
            name: name.to_string(),
            phone,
            area,
            locality: draft.locality_trimmed().map(str::to_string),
            budget_min_k: min,
            budget_max_k: max,
            budget_range: budget_range(min, max),
            bhk,
            furnishing,
            move_in,
            profile,
            notes: notes.map(str::to_string),
            source: "Website".to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn score(&self) -> LeadScore {
        LeadScore::from_move_in(self.move_in)
    }
}

/// The lead kept on the device after a successful submission, keyed by the
/// id the submission API issued. Independent of the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLead {
    pub lead_id: String,
    pub name: String,
    pub phone: String,
    pub area: Area,
    #[serde(default)]
    pub locality: Option<String>,
    pub bhk: Bhk,
    pub budget_range: String,
    pub furnishing: Furnishing,
    pub move_in: MoveIn,
    pub profile: Profile,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SubmittedLead {
    pub fn new(lead_id: impl Into<String>, submission: &LeadSubmission) -> Self {
        Self {
            lead_id: lead_id.into(),
            name: submission.name.clone(),
            phone: submission.phone.clone(),
            area: submission.area,
            locality: submission.locality.clone(),
            bhk: submission.bhk,
            budget_range: submission.budget_range.clone(),
            furnishing: submission.furnishing,
            move_in: submission.move_in,
            profile: submission.profile,
            notes: submission.notes.clone(),
            created_at: submission.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftPatch;

    fn complete_draft() -> RentalPreferenceDraft {
        let mut draft = RentalPreferenceDraft::default();
        draft.apply(DraftPatch {
            name: Some("  Priya Shah ".into()),
            phone: Some("98200 12345".into()),
            locality: Some("Orlem".into()),
            notes: Some("  ".into()),
            ..Default::default()
        });
        draft
    }

    #[test]
    fn test_valid_draft() {
        let lead = LeadSubmission::from_draft(&complete_draft(), Some("")).unwrap();
        assert_eq!(lead.name, "Priya Shah");
        assert_eq!(lead.phone, "9820012345");
        assert_eq!(lead.area, Area::MaladWest);
        assert_eq!(lead.locality.as_deref(), Some("Orlem"));
        assert_eq!(lead.budget_range, "40-60k");
        assert_eq!(lead.notes, None);
        assert_eq!(lead.score(), LeadScore::Hot);
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        let mut draft = complete_draft();
        draft.phone = Some("12345".into());
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::InvalidPhone)
        );
        draft.phone = None;
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::InvalidPhone)
        );
    }

    #[test]
    fn test_name_and_budget_rules() {
        let mut draft = complete_draft();
        draft.name = Some(" A ".into());
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::InvalidName)
        );

        let mut draft = complete_draft();
        draft.budget_max_k = Some(400);
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::BudgetOutOfRange)
        );

        let mut draft = complete_draft();
        draft.area = None;
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::Missing("area"))
        );
    }

    #[test]
    fn test_notes_limit() {
        let mut draft = complete_draft();
        draft.notes = Some("n".repeat(MAX_NOTES_CHARS + 1));
        assert_eq!(
            LeadSubmission::from_draft(&draft, None),
            Err(LeadError::NotesTooLong)
        );
    }

    #[test]
    fn test_honeypot() {
        assert_eq!(
            LeadSubmission::from_draft(&complete_draft(), Some("http://spam")),
            Err(LeadError::Honeypot)
        );
    }

    #[test]
    fn test_scores() {
        assert_eq!(LeadScore::from_move_in(MoveIn::Within7Days), LeadScore::Hot);
        assert_eq!(LeadScore::from_move_in(MoveIn::Within15Days), LeadScore::Warm);
        assert_eq!(LeadScore::from_move_in(MoveIn::ThirtyPlusDays), LeadScore::Cold);
    }

    #[test]
    fn test_budget_range_rounds_to_five() {
        assert_eq!(budget_range(42, 58), "40-60k");
        assert_eq!(budget_range(43, 67), "45-65k");
    }
}
