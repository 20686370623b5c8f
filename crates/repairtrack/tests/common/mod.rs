//! Shared harness for end-to-end controller tests.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use repairtrack::db::Database;
use repairtrack::{AttachmentStore, Controller, DeviceFields};

/// An isolated environment: in-memory database, a temporary managed
/// attachment directory, and a controller wired to both.
pub struct TestEnv {
    pub controller: Controller,
    pub db: Database,
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let store = AttachmentStore::open(dir.path().join("attachments")).unwrap();
        let controller = Controller::new(db.clone(), store);
        Self {
            controller,
            db,
            dir,
        }
    }

    /// Writes a source file outside the managed directory, as if the user
    /// had picked it in the file dialog.
    pub fn source_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn attachment_dir(&self) -> PathBuf {
        self.dir.path().join("attachments")
    }
}

/// A valid form draft with sensible defaults.
pub fn draft(barcode: &str) -> DeviceFields {
    DeviceFields {
        barcode: barcode.to_string(),
        region: "North".to_string(),
        person_name: "Jane Smith".to_string(),
        badge_number: "12345".to_string(),
        device_type: "Laptop".to_string(),
        serial_number: "SN-1".to_string(),
        sent_date: "01.01.2024".to_string(),
        returned_date: "05.01.2024".to_string(),
        status: "In Service".to_string(),
        note: String::new(),
    }
}
