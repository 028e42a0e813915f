use crate::data::{CategorySelector, FormInput, PinId};

/// Something the user did, or the app needs, that may change what the
/// surfaces show.
#[derive(Debug, PartialEq, Clone)]
pub enum InputEvent {
    /// (Re)load the catalog from the store.
    LoadRequested,
    /// The map was clicked; the location becomes the pending location of a
    /// new pin.
    MapClicked { lat: f64, lon: f64 },
    /// The "new pin" form was submitted for the pending location.
    PinSubmitted(FormInput),
    /// The "new pin" form was dismissed.
    SubmissionCancelled,
    CategorySelected(CategorySelector),
    SearchChanged(String),
    /// A pin was picked from the list.
    PinSelected(PinId),
    DashboardOpened,
    DashboardClosed,
    ExportRequested,
}
