use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::data::{CategorySelector, Pin, PinDraft, PinId};

use super::{LoadFailure, PersistenceError, PinStore};

/// The authoritative in-memory set of pins for the session, kept in step
/// with a `PinStore`.
pub struct PinCatalog<S: PinStore> {
    /// All known pins. Ids are unique. Right after a `load` this is sorted by
    /// date, most recent first; pins added since then are appended at the
    /// end.
    pins: Vec<Pin>,
    /// The store that this catalog loads from and writes to.
    store: S,
}

impl<S: PinStore> PinCatalog<S> {
    /// Creates an empty catalog. Call `load` to fill it from the store.
    pub fn new(store: S) -> Self {
        Self { pins: Vec::new(), store }
    }

    /// Replaces the whole catalog with the store's current contents, sorted
    /// most recent first. Records that cannot be parsed are skipped with a
    /// warning. If the store cannot be read at all, the failure is logged and
    /// the catalog is left empty.
    pub async fn load(&mut self) -> &[Pin] {
        let result = self.fetch_sorted().await;
        match result {
            Ok(pins) => {
                info!(count = pins.len(), "loaded pins");
                self.pins = pins;
            }
            Err(err) => {
                error!(error = %err, "failed to load pins");
                self.pins.clear();
            }
        }
        &self.pins
    }

    async fn fetch_sorted(&self) -> Result<Vec<Pin>, LoadFailure> {
        let records = self.store.fetch_all().await?;
        debug!(count = records.len(), "snapshot received");

        let mut seen = HashSet::with_capacity(records.len());
        let mut pins = Vec::with_capacity(records.len());
        for record in records {
            let pin = match Pin::try_from(record) {
                Ok(pin) => pin,
                Err(err) => {
                    warn!(id = %err.id, date = %err.date, "skipping malformed record");
                    continue;
                }
            };
            if !seen.insert(pin.id.clone()) {
                warn!(id = %pin.id, "store returned a duplicate id, keeping the first");
                continue;
            }
            pins.push(pin);
        }

        // stable, so pins on the same day keep the store's order
        pins.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(pins)
    }

    /// Persists the draft and, once the store has acknowledged it, appends
    /// the resulting pin to the catalog. Nothing is inserted before the
    /// store confirms the write.
    pub async fn add(&mut self, draft: PinDraft) -> Result<Pin, PersistenceError> {
        let id = match self.store.create_record(&draft).await {
            Ok(id) => id,
            Err(err) => {
                error!(error = %err, name = %draft.name, "failed to add pin");
                return Err(PersistenceError(err));
            }
        };
        info!(%id, name = %draft.name, "added pin");

        let pin = draft.into_pin(id);
        self.pins.push(pin.clone());
        Ok(pin)
    }

    /// Returns the pins in the given category, in catalog order.
    pub fn by_category(&self, selector: &CategorySelector) -> Vec<&Pin> {
        self.pins.iter().filter(|pin| selector.matches(pin.kind())).collect()
    }

    pub fn all(&self) -> &[Pin] {
        &self.pins
    }

    pub fn get(&self, id: &PinId) -> Option<&Pin> {
        self.pins.iter().find(|pin| &pin.id == id)
    }

    /// The distinct category tags present, in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.pins
            .iter()
            .filter(|pin| seen.insert(pin.kind()))
            .map(|pin| pin.kind().to_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
