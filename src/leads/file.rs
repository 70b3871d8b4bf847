use crate::leads::traits::LeadStore;
use crate::leads::types::SubmittedLead;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LAST_LEAD_FILE: &str = "last_lead.json";

/// Keeps each lead as `<dir>/<lead_id>.json` plus a copy of the latest one
/// in `<dir>/last_lead.json`
pub struct JsonFileLeadStore {
    dir: PathBuf,
}

impl JsonFileLeadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn last_path(&self) -> PathBuf {
        self.dir.join(LAST_LEAD_FILE)
    }
}

/// Lead ids become file names, so only a conservative alphabet is allowed,
/// and no id may name the last-lead file itself
fn valid_lead_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && LAST_LEAD_FILE.strip_suffix(".json") != Some(id)
}

#[async_trait]
impl LeadStore for JsonFileLeadStore {
    async fn save(&self, lead: &SubmittedLead) -> Result<()> {
        if !valid_lead_id(&lead.lead_id) {
            bail!("Invalid lead id: {:?}", lead.lead_id);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let json = serde_json::to_string_pretty(lead).context("Failed to serialize lead")?;

        let path = self.dir.join(format!("{}.json", lead.lead_id));
        tokio::fs::write(&path, &json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tokio::fs::write(self.last_path(), &json)
            .await
            .context("Failed to write last lead")?;

        info!("💾 Saved lead {} to {}", lead.lead_id, path.display());
        Ok(())
    }

    async fn load_last(&self) -> Result<Option<SubmittedLead>> {
        let path = self.last_path();
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved lead at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        match serde_json::from_str::<SubmittedLead>(&raw) {
            Ok(lead) if valid_lead_id(&lead.lead_id) => Ok(Some(lead)),
            Ok(_) => {
                warn!("Saved lead has no usable id, ignoring");
                Ok(None)
            }
            Err(e) => {
                warn!("Ignoring unreadable saved lead: {}", e);
                Ok(None)
            }
        }
    }

    fn store_name(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::types::LeadSubmission;
    use crate::models::{DraftPatch, RentalPreferenceDraft};

    fn lead(id: &str) -> SubmittedLead {
        let mut draft = RentalPreferenceDraft::default();
        draft.apply(DraftPatch {
            name: Some("Rahul".into()),
            phone: Some("9876543210".into()),
            ..Default::default()
        });
        let submission = LeadSubmission::from_draft(&draft, None).unwrap();
        SubmittedLead::new(id, &submission)
    }

    #[tokio::test]
    async fn test_save_and_load_last() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileLeadStore::new(tmp.path().join("leads"));

        assert_eq!(store.load_last().await.unwrap(), None);

        store.save(&lead("L-001")).await.unwrap();
        store.save(&lead("L-002")).await.unwrap();

        let last = store.load_last().await.unwrap().unwrap();
        assert_eq!(last.lead_id, "L-002");
        assert!(tmp.path().join("leads/L-001.json").exists());
        assert!(tmp.path().join("leads/L-002.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileLeadStore::new(tmp.path());
        tokio::fs::write(tmp.path().join(LAST_LEAD_FILE), "{not json")
            .await
            .unwrap();
        assert_eq!(store.load_last().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileLeadStore::new(tmp.path());
        assert!(store.save(&lead("../escape")).await.is_err());
        assert!(store.save(&lead("")).await.is_err());
    }

    #[tokio::test]
    async fn test_id_cannot_overwrite_last_lead_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileLeadStore::new(tmp.path());
        store.save(&lead("L-001")).await.unwrap();

        assert!(store.save(&lead("last_lead")).await.is_err());
        let last = store.load_last().await.unwrap().unwrap();
        assert_eq!(last.lead_id, "L-001");
    }
}
