use super::knowledge::{self, BotReply, Business, QuickAction};
use crate::extract::{extract_with_area, rules::tokens};
use crate::models::Area;
use crate::whatsapp::{chat_target, wa_link};
use tracing::debug;

/// Messages longer than this are cut before handling
pub const MAX_INPUT_CHARS: usize = 600;

/// What the assistant knows about the visitor when replying
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    /// Visitor phone, once the form has a valid one
    pub phone10: Option<String>,
    /// Area currently held by the shared draft
    pub draft_area: Option<Area>,
}

/// Trim and cap a message, marking the cut with an ellipsis
pub fn clamp_input(input: &str) -> String {
    let t = input.trim();
    if t.chars().count() <= MAX_INPUT_CHARS {
        return t.to_string();
    }
    let mut cut: String = t.chars().take(MAX_INPUT_CHARS).collect();
    cut.push('…');
    cut
}

fn has_word(q: &str, words: &[&str]) -> bool {
    tokens(q).any(|t| words.contains(&t))
}

/// Rule-based FAQ assistant
pub struct ChatEngine {
    business: Business,
}

impl ChatEngine {
    pub fn new(business: Business) -> Self {
        Self { business }
    }

    fn base_actions(&self) -> Vec<QuickAction> {
        vec![
            QuickAction::scroll("Fill Lead Form", "lead"),
            QuickAction::scroll("See FAQ", "faq"),
            QuickAction::whatsapp(
                "WhatsApp",
                "Hi! I'm looking for a rental home in Mumbai (Malad/Kandivali/Borivali).",
            ),
        ]
    }

    fn with_base(&self, text: impl Into<String>) -> BotReply {
        BotReply {
            text: text.into(),
            quick_actions: self.base_actions(),
        }
    }

    pub fn initial_message(&self) -> BotReply {
        BotReply {
            text: format!(
                "Hi! I'm the {} assistant.\nI can help with rentals in Malad, Kandivali & Borivali — shortlists, visits, documents and timelines.\n\nWhat are you looking for: 1BHK or 2BHK?",
                self.business.brand
            ),
            quick_actions: vec![
                QuickAction::scroll("Find a Home", "lead"),
                QuickAction::scroll("How it works", "how"),
                QuickAction::whatsapp(
                    "WhatsApp us",
                    "Hi! I want to find a rental home. Please share options.",
                ),
            ],
        }
    }

    /// Answer one visitor message.
    ///
    /// Recognized preferences come back as an [`QuickAction::ApplyDraft`]
    /// offer; the shared draft is never written here.
    pub fn reply(&self, input: &str, ctx: &ChatContext) -> BotReply {
        let input = clamp_input(input);
        let q = input.to_lowercase();

        if has_word(&q, &["hi", "hello", "hey", "hii", "namaste"]) {
            debug!("greeting");
            return self.with_base(
                "Hey! 👋 Tell me your preferred area (Malad/Kandivali/Borivali) and budget range — I'll guide you.",
            );
        }

        let extraction = extract_with_area(&input, ctx.draft_area);
        if extraction.is_meaningful() {
            debug!(fragments = extraction.summary.len(), "offering draft update");
            let summary = if extraction.summary.is_empty() {
                "Got it.".to_string()
            } else {
                extraction.summary.join(" • ")
            };
            let mut quick_actions = vec![QuickAction::ApplyDraft {
                label: "Apply to Form".to_string(),
                draft: extraction.patch,
                scroll_to_id: Some("lead".to_string()),
            }];
            quick_actions.extend(self.base_actions());
            return BotReply {
                text: format!(
                    "Perfect — I've captured this: {summary}\n\nTap below to apply these preferences into the form (you can edit before submitting)."
                ),
                quick_actions,
            };
        }

        if has_word(
            &q,
            &["area", "areas", "location", "where", "cover", "covered", "malad", "kandivali", "borivali"],
        ) {
            return self.with_base(format!(
                "We currently cover: {}.\nIf you share East/West + budget + 1/2BHK, we'll shortlist faster.",
                self.business.areas_line()
            ));
        }

        if has_word(&q, &["broker", "brokerage", "fee", "fees", "charge", "charges", "commission"]) {
            return self.with_base(knowledge::BROKERAGE);
        }

        if has_word(&q, &["visit", "schedule", "site", "show", "see", "inspection"]) {
            return BotReply {
                text: format!(
                    "{}\n\nTo schedule quickly, submit the form with your move-in date and profile.",
                    knowledge::VISITS
                ),
                quick_actions: vec![
                    QuickAction::scroll("Request shortlist", "lead"),
                    QuickAction::scroll("How it works", "how"),
                    QuickAction::whatsapp(
                        "WhatsApp to book",
                        "Hi! I want to schedule a site visit. My preferences are:",
                    ),
                ],
            };
        }

        if has_word(&q, &["doc", "docs", "documents", "paper", "paperwork", "agreement", "lease"]) {
            return self.with_base(knowledge::DOCUMENTS);
        }

        if has_word(&q, &["deposit", "security", "advance"]) {
            return self.with_base(knowledge::DEPOSIT);
        }

        if has_word(&q, &["bachelor", "bachelors", "single", "sharing", "family", "company", "corporate"]) {
            return self.with_base(format!(
                "{}\n\nIf you share your profile + move-in timeline, I'll tell you the best-fit areas/buildings.",
                knowledge::BACHELORS
            ));
        }

        if has_word(&q, &["pet", "pets", "dog", "cat"]) {
            return self.with_base(knowledge::PETS);
        }

        if has_word(&q, &["budget", "rent", "k", "lakh", "price"]) {
            return BotReply {
                text: "What budget range are you targeting? Example: 40–60k. Also tell me 1BHK or 2BHK and your preferred area.".to_string(),
                quick_actions: vec![
                    QuickAction::scroll("Set budget in form", "lead"),
                    QuickAction::whatsapp(
                        "Send budget on WhatsApp",
                        "Hi! My budget is __. Looking for __BHK in __.",
                    ),
                ],
            };
        }

        if has_word(&q, &["move", "movein", "immediate", "7", "15", "30", "month"]) {
            return BotReply {
                text: format!(
                    "{}\n\nWhat's your move-in: Immediate / 7 / 15 / 30+?",
                    knowledge::TIMELINE
                ),
                quick_actions: vec![
                    QuickAction::scroll("Choose move-in", "lead"),
                    QuickAction::whatsapp(
                        "Send move-in",
                        "Hi! My move-in date is __. Looking for __BHK in __, budget __.",
                    ),
                ],
            };
        }

        if has_word(&q, &["contact", "call", "phone", "number", "instagram", "ig"]) {
            return BotReply {
                text: format!(
                    "You can reach us on WhatsApp: {}\nInstagram: {}",
                    self.business.phone_display, self.business.instagram
                ),
                quick_actions: vec![
                    QuickAction::whatsapp("WhatsApp now", "Hi! I need help finding a rental home."),
                    QuickAction::Link {
                        label: "Open Instagram".to_string(),
                        href: self.business.instagram.clone(),
                    },
                ],
            };
        }

        self.with_base(
            "I can help with rentals in Malad/Kandivali/Borivali — areas, budget, documents, visits, and timelines.\nTell me: Area (E/W), budget range, and 1BHK/2BHK — or just submit the form and we'll message you.",
        )
    }

    /// Where a WhatsApp quick action should open
    pub fn whatsapp_href(&self, action: &QuickAction, ctx: &ChatContext) -> Option<String> {
        match action {
            QuickAction::Whatsapp { text, .. } => Some(wa_link(
                &chat_target(ctx.phone10.as_deref(), &self.business.whatsapp),
                text,
            )),
            _ => None,
        }
    }
}

impl Default for ChatEngine {
    fn default() -> Self {
        Self::new(Business::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;
    use crate::models::{Bhk, Profile};

    fn engine() -> ChatEngine {
        ChatEngine::default()
    }

    fn apply_patch(reply: &BotReply) -> Option<&crate::models::DraftPatch> {
        reply.quick_actions.iter().find_map(|a| match a {
            QuickAction::ApplyDraft { draft, .. } => Some(draft),
            _ => None,
        })
    }

    #[test]
    fn test_greeting() {
        let reply = engine().reply("Hello there", &ChatContext::default());
        assert!(reply.text.starts_with("Hey!"));
        assert_eq!(reply.quick_actions.len(), 3);
    }

    #[test]
    fn test_greeting_is_word_based() {
        // "this" and "which" contain "hi" but are not greetings
        let reply = engine().reply("which deposit is this", &ChatContext::default());
        assert_eq!(reply.text, knowledge::DEPOSIT);
    }

    #[test]
    fn test_preferences_offer_apply_action() {
        let reply = engine().reply(
            "Looking for 2bhk in malad west, budget 40-60k, family",
            &ChatContext::default(),
        );
        assert!(reply.text.contains("Area: Malad West • 2BHK"));
        let patch = apply_patch(&reply).expect("apply action offered");
        assert_eq!(patch.bhk, Some(Bhk::Two));
        assert_eq!(patch.profile, Some(Profile::Family));
        assert_eq!(reply.quick_actions[0].label(), "Apply to Form");
    }

    #[test]
    fn test_reply_never_touches_draft() {
        let store = DraftStore::new();
        let before = store.get_draft();
        let reply = engine().reply("1bhk borivali east 30k", &ChatContext::default());
        assert_eq!(store.get_draft(), before);

        // the visitor taps "Apply to Form"
        store.apply_external(apply_patch(&reply).unwrap().clone());
        let draft = store.get_draft();
        assert_eq!(draft.area, Some(Area::BorivaliEast));
        assert_eq!((draft.budget_min_k, draft.budget_max_k), (Some(20), Some(40)));
    }

    #[test]
    fn test_suburb_without_side_falls_to_area_faq() {
        let reply = engine().reply("malad", &ChatContext::default());
        assert!(reply.text.starts_with("We currently cover: Malad West, Malad East"));
        assert!(apply_patch(&reply).is_none());
    }

    #[test]
    fn test_topics() {
        let ctx = ChatContext::default();
        assert_eq!(engine().reply("what are your fees", &ctx).text, knowledge::BROKERAGE);
        assert_eq!(engine().reply("documents needed?", &ctx).text, knowledge::DOCUMENTS);
        assert_eq!(engine().reply("dog allowed", &ctx).text, knowledge::PETS);
        assert!(engine().reply("can I visit", &ctx).text.starts_with(knowledge::VISITS));
        assert!(engine().reply("what budget", &ctx).text.starts_with("What budget range"));
        assert!(engine().reply("your instagram", &ctx).text.contains("+91 74983 69191"));
    }

    #[test]
    fn test_fallback() {
        let reply = engine().reply("?!", &ChatContext::default());
        assert!(reply.text.starts_with("I can help with rentals"));
    }

    #[test]
    fn test_draft_area_scopes_locality() {
        let ctx = ChatContext {
            draft_area: Some(Area::KandivaliWest),
            ..Default::default()
        };
        let reply = engine().reply("something near charkop", &ctx);
        assert_eq!(apply_patch(&reply).unwrap().locality.as_deref(), Some("Charkop"));
    }

    #[test]
    fn test_whatsapp_href_uses_visitor_phone() {
        let engine = engine();
        let action = QuickAction::whatsapp("WhatsApp", "hello");
        let ctx = ChatContext {
            phone10: Some("9820012345".into()),
            ..Default::default()
        };
        assert_eq!(
            engine.whatsapp_href(&action, &ctx).as_deref(),
            Some("https://wa.me/919820012345?text=hello")
        );
        assert_eq!(
            engine
                .whatsapp_href(&action, &ChatContext::default())
                .as_deref(),
            Some("https://wa.me/917498369191?text=hello")
        );
    }

    #[test]
    fn test_clamp_input() {
        let long = "a".repeat(MAX_INPUT_CHARS + 10);
        let clamped = clamp_input(&long);
        assert_eq!(clamped.chars().count(), MAX_INPUT_CHARS + 1);
        assert!(clamped.ends_with('…'));
        assert_eq!(clamp_input("  hi  "), "hi");
    }
}
