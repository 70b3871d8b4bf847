pub mod engine;
pub mod knowledge;

pub use engine::{ChatContext, ChatEngine};
pub use knowledge::{BotReply, Business, QuickAction};
