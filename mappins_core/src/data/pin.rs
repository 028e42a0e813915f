use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{category::Category, time};

/// Document id assigned by the store when a pin is created. Opaque to the
/// core; only compared for equality.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub String);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled marker on the map.
#[derive(Debug, PartialEq, Clone)]
pub struct Pin {
    pub id: PinId,
    pub data: PinDraft,
}

/// Everything about a pin except its id, i.e. a pin that has not been
/// persisted yet.
#[derive(Debug, PartialEq, Clone)]
pub struct PinDraft {
    /// A short name for the place, e.g. "Le Chat Noir". Never empty when
    /// built through `PinDraft::from_form`.
    pub name: String,
    /// The category tag, kept verbatim even when it is not a known
    /// `Category`.
    pub kind: String,
    /// The day the place was visited, as picked by the user.
    pub date: NaiveDate,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}

/// The raw fields of the "new pin" form.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct FormInput {
    pub name: String,
    pub kind: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub date: String,
    pub description: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("A pin needs a name.")]
    EmptyName,
    #[error("Invalid date {0:?}, expected YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Latitude {0} is outside [-90, 90].")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is outside [-180, 180].")]
    LongitudeOutOfRange(f64),
}

impl Pin {
    pub fn category(&self) -> Category {
        Category::from_tag(&self.data.kind)
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn kind(&self) -> &str {
        &self.data.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.data.date
    }

    pub fn description(&self) -> &str {
        &self.data.description
    }
}

impl PinDraft {
    /// Builds a draft from the submitted form and the location captured from
    /// the map click. Empty names, malformed dates and out-of-range
    /// coordinates are rejected here, before anything reaches the store.
    pub fn from_form(form: FormInput, lat: f64, lon: f64) -> Result<Self, DraftError> {
        let FormInput { name, kind, date, description } = form;

        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        let date = time::parse_date(&date).map_err(|_| DraftError::InvalidDate(date))?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DraftError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DraftError::LongitudeOutOfRange(lon));
        }
        let kind = if kind.is_empty() { Category::Other.tag().to_owned() } else { kind };

        Ok(PinDraft { name, kind, date, description, lat, lon })
    }

    pub fn into_pin(self, id: PinId) -> Pin {
        Pin { id, data: self }
    }
}

/// The shape in which pins are stored and exported. The date travels as
/// `YYYY-MM-DD` text.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PinRecord {
    pub id: PinId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}

/// A stored record whose fields could not be turned into a `Pin`.
#[derive(Debug, Error, PartialEq)]
#[error("Record {id} has an invalid date {date:?}.")]
pub struct MalformedRecord {
    pub id: PinId,
    pub date: String,
}

impl TryFrom<PinRecord> for Pin {
    type Error = MalformedRecord;

    fn try_from(record: PinRecord) -> Result<Self, Self::Error> {
        let PinRecord { id, name, kind, date, description, lat, lon } = record;
        let Ok(parsed) = time::parse_date(&date) else {
            return Err(MalformedRecord { id, date });
        };
        Ok(Pin { id, data: PinDraft { name, kind, date: parsed, description, lat, lon } })
    }
}

impl From<&Pin> for PinRecord {
    fn from(pin: &Pin) -> Self {
        let PinDraft { name, kind, date, description, lat, lon } = &pin.data;
        PinRecord {
            id: pin.id.clone(),
            name: name.clone(),
            kind: kind.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            description: description.clone(),
            lat: *lat,
            lon: *lon,
        }
    }
}
