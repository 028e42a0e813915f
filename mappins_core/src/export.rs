//! The backup file offered for download: every pin in catalog order, as
//! pretty-printed JSON.

use chrono::NaiveDate;

use crate::data::{Pin, PinRecord};

pub fn export_snapshot(pins: &[Pin]) -> Result<String, serde_json::Error> {
    let records: Vec<PinRecord> = pins.iter().map(PinRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

/// E.g. `mappins_backup_2024-03-02.json`.
pub fn export_file_name(prefix: &str, today: NaiveDate) -> String {
    format!("{}_{}.json", prefix, today.format("%Y-%m-%d"))
}
