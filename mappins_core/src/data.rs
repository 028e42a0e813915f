pub mod category;
pub mod pin;
pub mod time;

pub use category::{Category, CategorySelector};
pub use pin::{DraftError, FormInput, MalformedRecord, Pin, PinDraft, PinId, PinRecord};
pub use time::YearMonth;
