//! Lead capture for Mumbai rentals: one preference draft shared by the
//! chat assistant, the lead form and landing-page links.

pub mod afford;
pub mod bot;
pub mod draft;
pub mod extract;
pub mod leads;
pub mod locality;
pub mod models;
pub mod prefill;
pub mod settings;
pub mod whatsapp;
