//! Shared draft store.
//!
//! One [`DraftStore`] is created per visitor session and handed to every
//! surface that reads or edits the request (form, chat assistant, URL
//! prefill, share links). Writes go through a watch channel, so they are
//! applied one at a time in call order and every subscriber sees the latest
//! snapshot.

pub mod consumer;

pub use consumer::{FormView, LocalityBinding, SyncOutcome};

use crate::models::{DraftPatch, RentalPreferenceDraft};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Receiving side handed to consumers
pub type DraftSubscription = watch::Receiver<RentalPreferenceDraft>;

pub struct DraftStore {
    tx: watch::Sender<RentalPreferenceDraft>,
    last_prefill_ms: AtomicI64,
}

impl DraftStore {
    /// Start a session with the default draft
    pub fn new() -> Self {
        Self::with_draft(RentalPreferenceDraft::default())
    }

    pub fn with_draft(draft: RentalPreferenceDraft) -> Self {
        let (tx, _rx) = watch::channel(draft);
        Self {
            tx,
            last_prefill_ms: AtomicI64::new(0),
        }
    }

    /// Convenience for the common case of sharing the store across consumers
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of the current draft
    pub fn get_draft(&self) -> RentalPreferenceDraft {
        self.tx.borrow().clone()
    }

    /// Merge a patch into the draft and notify subscribers
    pub fn set_draft(&self, patch: DraftPatch) {
        debug!(?patch, "draft write");
        self.tx.send_modify(|draft| draft.apply(patch));
    }

    /// Merge a patch coming from outside the form (URL prefill, chat apply)
    /// and stamp the draft so the form knows to re-sync.
    ///
    /// Returns the new prefill timestamp.
    pub fn apply_external(&self, patch: DraftPatch) -> i64 {
        let mut stamped = 0;
        self.tx.send_modify(|draft| {
            draft.apply(patch);
            let now = Utc::now().timestamp_millis();
            let ts = now.max(self.last_prefill_ms.load(Ordering::SeqCst) + 1);
            self.last_prefill_ms.store(ts, Ordering::SeqCst);
            draft.prefill_ts = Some(ts);
            stamped = ts;
        });
        info!(prefill_ts = stamped, "applied external draft update");
        stamped
    }

    /// Reset to the default draft
    pub fn clear_draft(&self) {
        info!("draft cleared");
        self.tx.send_replace(RentalPreferenceDraft::default());
    }

    pub fn subscribe(&self) -> DraftSubscription {
        self.tx.subscribe()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Area, Bhk, Profile};
    use std::thread;

    #[test]
    fn test_defaults_and_merge() {
        let store = DraftStore::new();
        assert_eq!(store.get_draft(), RentalPreferenceDraft::default());

        store.set_draft(DraftPatch {
            bhk: Some(Bhk::Two),
            ..Default::default()
        });
        let draft = store.get_draft();
        assert_eq!(draft.bhk, Some(Bhk::Two));
        assert_eq!(draft.area, Some(Area::MaladWest));
        assert_eq!(draft.prefill_ts, None);
    }

    #[test]
    fn test_subscribers_see_writes() {
        let store = DraftStore::new();
        let mut form = store.subscribe();
        let mut chat = store.subscribe();

        store.set_draft(DraftPatch {
            profile: Some(Profile::Company),
            ..Default::default()
        });

        assert!(form.has_changed().unwrap());
        assert!(chat.has_changed().unwrap());
        assert_eq!(form.borrow_and_update().profile, Some(Profile::Company));
        assert!(!form.has_changed().unwrap());
        assert_eq!(chat.borrow_and_update().profile, Some(Profile::Company));
    }

    #[test]
    fn test_last_writer_wins() {
        let store = DraftStore::new();
        store.set_draft(DraftPatch {
            notes: Some("first".into()),
            ..Default::default()
        });
        store.set_draft(DraftPatch {
            notes: Some("second".into()),
            ..Default::default()
        });
        assert_eq!(store.get_draft().notes.as_deref(), Some("second"));
    }

    #[test]
    fn test_prefill_timestamp_is_monotonic() {
        let store = DraftStore::new();
        let a = store.apply_external(DraftPatch::default());
        let b = store.apply_external(DraftPatch::default());
        let c = store.apply_external(DraftPatch::default());
        assert!(a < b && b < c);
        assert_eq!(store.get_draft().prefill_ts, Some(c));
    }

    #[test]
    fn test_clear_restores_defaults() {
        let store = DraftStore::new();
        store.apply_external(DraftPatch {
            area: Some(Area::BorivaliEast),
            name: Some("Asha".into()),
            ..Default::default()
        });
        store.clear_draft();
        assert_eq!(store.get_draft(), RentalPreferenceDraft::default());
    }

    #[test]
    fn test_writes_from_many_threads_are_all_applied() {
        let store = DraftStore::shared();
        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.set_draft(DraftPatch {
                        budget_max_k: Some(100 + i),
                        ..Default::default()
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let draft = store.get_draft();
        let max = draft.budget_max_k.unwrap();
        assert!((100..108).contains(&max));
        assert!(draft.budget_min_k.unwrap() <= max);
    }
}
