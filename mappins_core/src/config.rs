//! Tunables for the coordinator and the surfaces it drives.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::logging;

/// Settings with sensible defaults; a JSON file only needs to name the
/// fields it overrides.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the map starts, as `(lat, lon)`.
    pub map_center: (f64, f64),
    pub map_zoom: u8,
    /// Zoom level used when flying to a pin picked from the list.
    pub focus_zoom: u8,
    /// Prefix of the exported file name; the date and `.json` are appended.
    pub export_prefix: String,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read the config file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_center: (48.8566, 2.3522),
            map_zoom: 13,
            focus_zoom: 16,
            export_prefix: "mappins_backup".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Installs the log subscriber with `log_level` as the default filter.
    pub fn init_logging(&self) {
        logging::init(&self.log_level);
    }

    #[must_use]
    pub fn with_map_center(mut self, lat: f64, lon: f64) -> Self {
        self.map_center = (lat, lon);
        self
    }

    #[must_use]
    pub fn with_focus_zoom(mut self, zoom: u8) -> Self {
        self.focus_zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }
}
