//! The device-service record: one row per repair cycle.
//!
//! Multiple records may share a barcode — each represents one round trip
//! to the repair service for that device.

use serde::{Deserialize, Serialize};

/// Fixed vocabulary for the device type field.
pub const DEVICE_TYPES: &[&str] = &[
    "Laptop",
    "SIM Card",
    "Tablet",
    "Handheld Terminal",
    "Desktop PC",
    "PC Monitor",
    "Mobile Printer",
    "PC Printer",
    "UPS",
];

/// Fixed vocabulary for the status field.
pub const STATUSES: &[&str] = &[
    "In Service",
    "Sent to Service",
    "Repaired",
    "Beyond Repair",
    "Scrapped",
];

/// The mutable fields of a record, as entered in the form.
///
/// Dates are `dd.mm.yyyy` strings; `validate::validate_fields` checks the
/// format and ordering before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFields {
    pub barcode: String,
    pub region: String,
    pub person_name: String,
    pub badge_number: String,
    pub device_type: String,
    pub serial_number: String,
    pub sent_date: String,
    pub returned_date: String,
    pub status: String,
    pub note: String,
}

/// A persisted record: store-assigned id, the form fields, and the list of
/// attachment destination paths in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: i64,
    #[serde(flatten)]
    pub fields: DeviceFields,
    pub attachments: Vec<String>,
}
