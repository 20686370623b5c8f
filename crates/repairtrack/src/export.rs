//! CSV export of the displayed record list.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::ExportError;
use crate::record::DeviceRecord;

const HEADERS: [&str; 12] = [
    "Record ID",
    "Barcode",
    "Region",
    "Person Name",
    "Badge Number",
    "Device Type",
    "Serial Number",
    "Sent Date",
    "Returned Date",
    "Status",
    "Note",
    "Attachment Count",
];

/// Writes `rows` to `service_records_{timestamp}.csv` inside `directory`
/// and returns the path written. Declines an empty row set.
pub fn write_csv(rows: &[DeviceRecord], directory: &Path) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let filename = format!(
        "service_records_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = directory.join(filename);

    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |e: csv::Error| ExportError::WriteFile { path, source: e }
    };

    let mut writer = csv::Writer::from_path(&path).map_err(write_err(&path))?;
    writer.write_record(HEADERS).map_err(write_err(&path))?;

    for record in rows {
        writer
            .write_record([
                record.id.to_string(),
                record.fields.barcode.clone(),
                record.fields.region.clone(),
                record.fields.person_name.clone(),
                record.fields.badge_number.clone(),
                record.fields.device_type.clone(),
                record.fields.serial_number.clone(),
                record.fields.sent_date.clone(),
                record.fields.returned_date.clone(),
                record.fields.status.clone(),
                record.fields.note.clone(),
                record.attachments.len().to_string(),
            ])
            .map_err(write_err(&path))?;
    }

    writer
        .flush()
        .map_err(|e| ExportError::WriteFile {
            path: path.clone(),
            source: csv::Error::from(e),
        })?;

    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DeviceFields;
    use tempfile::TempDir;

    fn record(id: i64, barcode: &str) -> DeviceRecord {
        DeviceRecord {
            id,
            fields: DeviceFields {
                barcode: barcode.to_string(),
                region: "North".to_string(),
                person_name: "Jane Smith".to_string(),
                status: "Repaired".to_string(),
                ..Default::default()
            },
            attachments: vec!["a.pdf".to_string(), "b.pdf".to_string()],
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();

        let path = write_csv(&[record(1, "BC1"), record(2, "BC2")], dir.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Record ID,Barcode"));
        assert!(lines[1].starts_with("1,BC1"));
        assert!(lines[1].ends_with(",2"));
    }

    #[test]
    fn test_export_filename_is_timestamped() {
        let dir = TempDir::new().unwrap();

        let path = write_csv(&[record(1, "BC1")], dir.path()).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("service_records_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_export_declines_empty_rows() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            write_csv(&[], dir.path()),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn test_export_fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");

        assert!(matches!(
            write_csv(&[record(1, "BC1")], &gone),
            Err(ExportError::WriteFile { .. })
        ));
    }

    #[test]
    fn test_export_quotes_notes_with_commas() {
        let dir = TempDir::new().unwrap();
        let mut r = record(1, "BC1");
        r.fields.note = "screen broken, keyboard too".to_string();

        let path = write_csv(&[r], dir.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"screen broken, keyboard too\""));
    }
}
