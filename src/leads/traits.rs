use crate::leads::types::SubmittedLead;
use anyhow::Result;
use async_trait::async_trait;

/// Durable storage for the last submitted lead.
/// Lets the resume prompt work across visits without knowing where leads live.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persist a lead under its id and mark it as the most recent one
    async fn save(&self, lead: &SubmittedLead) -> Result<()>;

    /// Most recently saved lead, `None` if nothing usable is stored
    async fn load_last(&self) -> Result<Option<SubmittedLead>>;

    /// Name of the backing store, for logs
    fn store_name(&self) -> &'static str;
}
