use super::{DraftStore, DraftSubscription};
use crate::locality::is_locality_of;
use crate::models::{Area, DraftPatch, RentalPreferenceDraft};
use std::sync::Arc;
use tracing::{debug, info};

/// The area/locality pair a consumer holds.
///
/// Every consumer that keeps a locality next to an area uses this so the
/// invalidation rule stays the same everywhere: when the area moves to a
/// suburb whose list does not contain the held locality, the locality is
/// cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityBinding {
    area: Option<Area>,
    locality: String,
}

impl LocalityBinding {
    pub fn new(area: Option<Area>, locality: impl Into<String>) -> Self {
        Self {
            area,
            locality: locality.into(),
        }
    }

    pub fn area(&self) -> Option<Area> {
        self.area
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn set_locality(&mut self, locality: impl Into<String>) {
        self.locality = locality.into();
    }

    /// Record the area currently shown. Returns the locality that was
    /// dropped, if the change invalidated it.
    pub fn observe_area(&mut self, area: Option<Area>) -> Option<String> {
        if area == self.area {
            return None;
        }
        self.area = area;

        let area = area?;
        if self.locality.trim().is_empty() || is_locality_of(area, &self.locality) {
            return None;
        }

        debug!(%area, locality = %self.locality, "locality no longer matches area");
        Some(std::mem::take(&mut self.locality))
    }
}

/// What a [`FormView::sync`] call observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub changed: bool,
    /// A URL/chat write landed since the last sync; the form should scroll into view
    pub prefilled: bool,
    /// The held locality was cleared because the area changed
    pub locality_cleared: bool,
}

/// The multi-step lead form as a draft consumer.
///
/// It mirrors the shared draft, enforces the area/locality rule and writes
/// a cleared locality back so the other surfaces see it too.
pub struct FormView {
    store: Arc<DraftStore>,
    rx: DraftSubscription,
    values: RentalPreferenceDraft,
    binding: LocalityBinding,
    seen_prefill: Option<i64>,
}

impl FormView {
    pub fn new(store: Arc<DraftStore>) -> Self {
        let mut rx = store.subscribe();
        let values = rx.borrow_and_update().clone();
        let binding = LocalityBinding::new(values.area, values.locality.clone().unwrap_or_default());
        let seen_prefill = values.prefill_ts;
        Self {
            store,
            rx,
            values,
            binding,
            seen_prefill,
        }
    }

    pub fn values(&self) -> &RentalPreferenceDraft {
        &self.values
    }

    /// Pull the latest draft if it changed since the last call
    pub fn sync(&mut self) -> SyncOutcome {
        if !self.rx.has_changed().unwrap_or(false) {
            return SyncOutcome::default();
        }
        let draft = self.rx.borrow_and_update().clone();

        let prefilled = draft.prefill_ts.is_some() && draft.prefill_ts != self.seen_prefill;
        self.seen_prefill = draft.prefill_ts;

        self.binding
            .set_locality(draft.locality.clone().unwrap_or_default());
        let cleared = self.binding.observe_area(draft.area);
        self.values = draft;

        if let Some(old) = &cleared {
            info!(locality = %old, "clearing locality after area change");
            self.values.locality = Some(String::new());
            self.store.set_draft(DraftPatch {
                locality: Some(String::new()),
                ..Default::default()
            });
            // own write-back, not a change to report on the next sync
            self.values = self.rx.borrow_and_update().clone();
        }

        SyncOutcome {
            changed: true,
            prefilled,
            locality_cleared: cleared.is_some(),
        }
    }

    /// User input on the form itself
    pub fn input(&mut self, patch: DraftPatch) {
        self.store.set_draft(patch);
        self.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_clears_on_suburb_change() {
        let mut binding = LocalityBinding::new(Some(Area::MaladWest), "Mindspace");
        assert_eq!(
            binding.observe_area(Some(Area::KandivaliWest)),
            Some("Mindspace".to_string())
        );
        assert_eq!(binding.locality(), "");
    }

    #[test]
    fn test_binding_keeps_locality_within_suburb() {
        let mut binding = LocalityBinding::new(Some(Area::MaladWest), "Mindspace");
        assert_eq!(binding.observe_area(Some(Area::MaladEast)), None);
        assert_eq!(binding.locality(), "Mindspace");
    }

    #[test]
    fn test_binding_keeps_shared_names() {
        let mut binding = LocalityBinding::new(Some(Area::MaladWest), "Link Road");
        assert_eq!(binding.observe_area(Some(Area::BorivaliEast)), None);
        assert_eq!(binding.locality(), "Link Road");
    }

    #[test]
    fn test_form_clears_stale_locality_in_store() {
        let store = DraftStore::shared();
        let mut form = FormView::new(Arc::clone(&store));

        form.input(DraftPatch {
            locality: Some("Mindspace".into()),
            ..Default::default()
        });
        assert_eq!(form.values().locality.as_deref(), Some("Mindspace"));

        // a different surface moves the area to another suburb
        store.set_draft(DraftPatch {
            area: Some(Area::BorivaliWest),
            ..Default::default()
        });
        let outcome = form.sync();
        assert!(outcome.changed);
        assert!(outcome.locality_cleared);
        assert_eq!(form.values().locality.as_deref(), Some(""));
        assert_eq!(store.get_draft().locality.as_deref(), Some(""));
        assert_eq!(store.get_draft().area, Some(Area::BorivaliWest));

        assert_eq!(form.sync(), SyncOutcome::default());
    }

    #[test]
    fn test_form_notices_external_writes() {
        let store = DraftStore::shared();
        let mut form = FormView::new(Arc::clone(&store));
        assert_eq!(form.sync(), SyncOutcome::default());

        store.apply_external(DraftPatch {
            area: Some(Area::KandivaliEast),
            locality: Some("Thakur Village".into()),
            ..Default::default()
        });
        let outcome = form.sync();
        assert!(outcome.prefilled);
        assert!(!outcome.locality_cleared);
        assert_eq!(form.values().locality.as_deref(), Some("Thakur Village"));

        store.set_draft(DraftPatch {
            notes: Some("lift needed".into()),
            ..Default::default()
        });
        let outcome = form.sync();
        assert!(outcome.changed);
        assert!(!outcome.prefilled);
    }
}
