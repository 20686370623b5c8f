//! Field validation applied before any store write.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::record::DeviceFields;

/// Maximum note length in characters.
pub const NOTE_MAX_CHARS: usize = 300;

/// Calendar date format used throughout the record table.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

static BADGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5,}$").expect("badge pattern"));

/// Checks every form-level invariant: barcode present, badge number format,
/// date format and ordering, note length.
///
/// A failure here means the operation is aborted with no partial state
/// change anywhere.
pub fn validate_fields(fields: &DeviceFields) -> Result<(), ValidationError> {
    if fields.barcode.trim().is_empty() {
        return Err(ValidationError::MissingBarcode);
    }

    if !fields.badge_number.is_empty() && !BADGE_RE.is_match(&fields.badge_number) {
        return Err(ValidationError::InvalidBadgeNumber(
            fields.badge_number.clone(),
        ));
    }

    let sent = parse_date("sent", &fields.sent_date)?;
    let returned = parse_date("returned", &fields.returned_date)?;
    if sent > returned {
        return Err(ValidationError::DateOrder {
            sent: fields.sent_date.clone(),
            returned: fields.returned_date.clone(),
        });
    }

    let len = fields.note.chars().count();
    if len > NOTE_MAX_CHARS {
        return Err(ValidationError::NoteTooLong {
            len,
            max: NOTE_MAX_CHARS,
        });
    }

    Ok(())
}

/// Parses a `dd.mm.yyyy` date string.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Live editing behavior for the note field: trim, then truncate to the
/// character cap. Truncation, not rejection.
pub fn clamp_note(note: &str) -> String {
    note.trim().chars().take(NOTE_MAX_CHARS).collect()
}
