pub mod file;
pub mod traits;
pub mod types;

pub use file::JsonFileLeadStore;
pub use traits::LeadStore;
pub use types::{budget_range, LeadError, LeadScore, LeadSubmission, SubmittedLead};
