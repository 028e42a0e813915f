//! Core of the map pins app: the pin catalog kept in step with a remote
//! store, the filtered/grouped/aggregated views derived from it, and the
//! coordinator that feeds those views to the map, the list and the charts.

pub mod config;
pub mod coordinator;
pub mod data;
pub mod export;
pub mod logging;
pub mod sync;
pub mod view;

pub use config::Config;
pub use coordinator::{CoordinatorError, InputEvent, RenderCommand, Surfaces, ViewCoordinator};
pub use data::{Category, CategorySelector, FormInput, Pin, PinDraft, PinId, PinRecord};
pub use sync::{MemoryStore, PinCatalog, PinStore};
