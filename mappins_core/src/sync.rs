pub mod client;
pub mod server;

use thiserror::Error;

use crate::data::{PinDraft, PinId, PinRecord};

pub use client::PinCatalog;
pub use server::MemoryStore;

/// Defines the operations the catalog needs from the remote document store
/// that persists pins.
#[allow(async_fn_in_trait)]
pub trait PinStore {
    /// Downloads every stored pin record, in whatever order the store keeps
    /// them.
    async fn fetch_all(&self) -> Result<Vec<PinRecord>, StoreError>;

    /// Persists a new record built from the given draft and returns the id
    /// that the store assigned to it. The draft must not be considered stored
    /// unless this returns `Ok`.
    async fn create_record(&self, draft: &PinDraft) -> Result<PinId, StoreError>;
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum StoreError {
    #[error("Unable to communicate with the store.")]
    Unavailable,
    #[error("The store rejected the write: {0}")]
    Rejected(String),
    #[error("The store sent a malformed response: {0}")]
    Malformed(String),
}

/// Why a `load` produced an empty catalog.
#[derive(Error, Debug, PartialEq)]
#[error(transparent)]
pub struct LoadFailure(#[from] pub StoreError);

/// Returned when a new pin could not be persisted. The catalog is unchanged.
#[derive(Error, Debug, PartialEq)]
#[error("Unable to save the pin: {0}")]
pub struct PersistenceError(#[from] pub StoreError);
