//! Old/new field comparison for the update confirmation step.

use crate::record::{DeviceFields, DeviceRecord};

/// One changed field, with trimmed old and new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

/// Compares every mutable field of the stored record against the edited
/// values. Values are trimmed before comparison; a field is reported only
/// when the trimmed values differ and at least one side is non-empty.
///
/// A grown attachment list is reported as an additional changed field
/// (counts only — attachments are never removed by an update).
pub(crate) fn compute_changes(
    current: &DeviceRecord,
    edited: &DeviceFields,
    new_attachment_count: usize,
) -> Vec<FieldChange> {
    let pairs: [(&'static str, &str, &str); 10] = [
        ("Barcode", &current.fields.barcode, &edited.barcode),
        ("Region", &current.fields.region, &edited.region),
        ("Person Name", &current.fields.person_name, &edited.person_name),
        (
            "Badge Number",
            &current.fields.badge_number,
            &edited.badge_number,
        ),
        (
            "Device Type",
            &current.fields.device_type,
            &edited.device_type,
        ),
        (
            "Serial Number",
            &current.fields.serial_number,
            &edited.serial_number,
        ),
        ("Sent Date", &current.fields.sent_date, &edited.sent_date),
        (
            "Returned Date",
            &current.fields.returned_date,
            &edited.returned_date,
        ),
        ("Status", &current.fields.status, &edited.status),
        ("Note", &current.fields.note, &edited.note),
    ];

    let mut changes = Vec::new();
    for (field, old, new) in pairs {
        let old = old.trim();
        let new = new.trim();
        if old != new && (!old.is_empty() || !new.is_empty()) {
            changes.push(FieldChange {
                field,
                old: old.to_string(),
                new: new.to_string(),
            });
        }
    }

    if new_attachment_count > current.attachments.len() {
        changes.push(FieldChange {
            field: "Attachments",
            old: current.attachments.len().to_string(),
            new: new_attachment_count.to_string(),
        });
    }

    changes
}
