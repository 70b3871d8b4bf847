//! WhatsApp hand-off: `wa.me` deep links and the prefilled messages the
//! brokerage receives.

use crate::leads::{budget_range, SubmittedLead};
use crate::models::{only_digits, RentalPreferenceDraft};

/// `https://wa.me/<digits>?text=<percent-encoded text>`
pub fn wa_link(number: &str, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        only_digits(number),
        urlencoding::encode(text)
    )
}

/// Chat with the visitor's own number (country code prepended) when it is a
/// valid 10-digit phone, otherwise with the business number.
pub fn chat_target(phone10: Option<&str>, business: &str) -> String {
    match phone10.map(only_digits) {
        Some(digits) if digits.len() == 10 => format!("91{digits}"),
        _ => only_digits(business),
    }
}

/// Message sent from the lead form's "continue on WhatsApp" button
pub fn form_message(draft: &RentalPreferenceDraft) -> String {
    let name = draft
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("looking for a home");
    let bhk = draft.bhk.map(|b| b.as_str()).unwrap_or("1");
    let area = draft.area.map(|a| a.as_str()).unwrap_or("Malad West");
    let budget = match (draft.budget_min_k, draft.budget_max_k) {
        (Some(min), Some(max)) => budget_range(min, max),
        _ => "40-60k".to_string(),
    };
    let move_in = draft.move_in.map(|m| m.label()).unwrap_or("Immediately");
    let profile = draft.profile.map(|p| p.as_str()).unwrap_or("Family");

    format!("Hi, I'm {name}. Need {bhk} BHK in {area}, budget {budget}, move-in {move_in}, {profile}.")
}

/// Follow-up message for a lead that was already submitted
pub fn resume_message(lead: &SubmittedLead) -> String {
    let area = match lead.locality.as_deref().filter(|l| !l.is_empty()) {
        Some(locality) => format!("{} ({})", lead.area, locality),
        None => lead.area.to_string(),
    };
    format!(
        "Hi, I submitted a rental request.\nLead ID: {}\nArea: {}\nBHK: {}\nBudget: {}\nMove-in: {}\nProfile: {}\nPhone: {}",
        lead.lead_id,
        area,
        lead.bhk.as_str(),
        lead.budget_range,
        lead.move_in.label(),
        lead.profile.as_str(),
        lead.phone
    )
}

/// Text for forwarding a share link to a friend
pub fn share_message(draft: &RentalPreferenceDraft, share_url: &str) -> String {
    let area = draft
        .area
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Western Suburbs".to_string());
    format!(
        "Hey! I found this service for Mumbai rentals in {area}. Fill in your details here: {share_url}"
    )
}
