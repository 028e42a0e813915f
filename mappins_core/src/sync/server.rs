use std::{cell::RefCell, rc::Rc};

use tracing::debug;

use crate::data::{PinDraft, PinId, PinRecord};

use super::{PinStore, StoreError};

#[derive(Debug, Default)]
struct StoreState {
    /// Records in insertion order, the way a document collection would list
    /// them.
    records: Vec<PinRecord>,
    /// When set, every request fails with this error instead of touching
    /// `records`.
    failure: Option<StoreError>,
}

/// An in-process `PinStore`. Clones share the same underlying collection, so
/// a handle can be kept to inspect or sabotage the store after handing it to
/// a catalog.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given records.
    pub fn with_records(records: Vec<PinRecord>) -> Self {
        let store = Self::new();
        store.replace_records(records);
        store
    }

    pub fn replace_records(&self, records: Vec<PinRecord>) {
        self.state.borrow_mut().records = records;
    }

    /// Makes all following requests fail with `failure`, or succeed again
    /// when given `None`.
    pub fn fail_with(&self, failure: Option<StoreError>) {
        self.state.borrow_mut().failure = failure;
    }

    pub fn records(&self) -> Vec<PinRecord> {
        self.state.borrow().records.clone()
    }

    // Returns an id not used by any stored record.
    fn gen_unique_id(state: &StoreState) -> PinId {
        loop {
            let id = PinId(format!("{:016x}", rand::random::<u64>()));
            if state.records.iter().all(|record| record.id != id) {
                return id;
            }
        }
    }
}

impl PinStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<PinRecord>, StoreError> {
        let state = self.state.borrow();
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state.records.clone())
    }

    async fn create_record(&self, draft: &PinDraft) -> Result<PinId, StoreError> {
        let mut state = self.state.borrow_mut();
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }

        let id = Self::gen_unique_id(&state);
        let pin = draft.clone().into_pin(id.clone());
        state.records.push(PinRecord::from(&pin));
        debug!(%id, "stored record");
        Ok(id)
    }
}
