use crate::models::{Area, DraftPatch};
use serde::{Deserialize, Serialize};

/// Buttons offered under a bot reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuickAction {
    Scroll {
        label: String,
        target_id: String,
    },
    Whatsapp {
        label: String,
        text: String,
    },
    Link {
        label: String,
        href: String,
    },
    /// Copy extracted preferences into the shared draft; only ever applied
    /// when the visitor taps it
    ApplyDraft {
        label: String,
        draft: DraftPatch,
        scroll_to_id: Option<String>,
    },
}

impl QuickAction {
    pub fn scroll(label: &str, target_id: &str) -> Self {
        Self::Scroll {
            label: label.to_string(),
            target_id: target_id.to_string(),
        }
    }

    pub fn whatsapp(label: &str, text: &str) -> Self {
        Self::Whatsapp {
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Scroll { label, .. }
            | Self::Whatsapp { label, .. }
            | Self::Link { label, .. }
            | Self::ApplyDraft { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotReply {
    pub text: String,
    pub quick_actions: Vec<QuickAction>,
}

/// Brokerage contact details shown by the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub brand: String,
    /// 91 followed by 10 digits
    pub whatsapp: String,
    pub phone_display: String,
    pub instagram: String,
}

impl Default for Business {
    fn default() -> Self {
        Self {
            brand: "MumbaiRentals".to_string(),
            whatsapp: "917498369191".to_string(),
            phone_display: "+91 74983 69191".to_string(),
            instagram: "https://instagram.com/ayushjha.creates".to_string(),
        }
    }
}

impl Business {
    pub fn areas_line(&self) -> String {
        Area::ALL
            .iter()
            .map(Area::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const BROKERAGE: &str = "We keep charges transparent. Brokerage (if any) depends on the final deal and will be confirmed before you visit. No surprise fees.";

pub const VISITS: &str = "Yes — we can schedule same-day visits depending on availability. Usually you'll get a shortlist first, then we book visits at your convenience.";

pub const DOCUMENTS: &str = "Commonly required: Govt ID, employment proof (salary slips / offer letter), and basic KYC for all occupants. Final docs depend on owner/society rules.";

pub const BACHELORS: &str = "Bachelors are considered case-by-case depending on the building and owner preference. Share your profile and area; we'll filter accordingly.";

pub const DEPOSIT: &str = "Deposit typically ranges from 2–4 months rent, but it varies by building and owner. We'll mention it upfront in the shortlist.";

pub const PETS: &str = "Some societies are pet-friendly, some are not. Mention pets in notes so we only share suitable options.";

pub const TIMELINE: &str = "If you're moving in Immediate / 7 / 15 days, you'll be marked as a Hot lead and we prioritize faster shortlists and visits.";
