//! Filename sanitization for attachment storage.
//!
//! Attachment files are copied into the managed directory under a name
//! composed from record fields. Each component is cleaned of characters
//! that are invalid in filenames on at least one supported platform.

/// Characters replaced with `_` in composed filename components.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Placeholder used in attachment names when a record has no serial number.
const EMPTY_SERIAL: &str = "bos";

/// Replaces every forbidden character in `raw` with an underscore.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect()
}

/// Composes the destination filename for an attachment:
/// `{record_id}_{barcode}_{serial}_{original}`, all components sanitized.
pub fn attachment_filename(record_id: i64, barcode: &str, serial: &str, original: &str) -> String {
    let serial = if serial.is_empty() { EMPTY_SERIAL } else { serial };
    format!(
        "{}_{}_{}_{}",
        record_id,
        sanitize_component(barcode),
        sanitize_component(serial),
        sanitize_component(original)
    )
}
