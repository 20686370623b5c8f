//! Managed attachment storage.
//!
//! Selected source files are copied into a single managed directory under
//! a composed, collision-safe name (see [`crate::sanitize`]). The record
//! keeps the destination paths; the original files are never moved.

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::sanitize;

/// A source file that could not be ingested, with the reason it was
/// skipped. The batch continues past skipped files.
#[derive(Debug)]
pub struct SkippedFile {
    pub source: PathBuf,
    pub reason: String,
}

/// Result of an ingest batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Destination paths newly appended to the record's attachment list.
    pub stored: Vec<String>,
    /// Source files skipped with their reasons.
    pub skipped: Vec<SkippedFile>,
}

/// Owns the managed attachment directory.
pub struct AttachmentStore {
    directory: PathBuf,
}

impl AttachmentStore {
    /// Opens the store, creating the managed directory if absent.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self, StorageError> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.exists() {
            std::fs::create_dir_all(&directory).map_err(|e| StorageError::CreateDirectory {
                path: directory.clone(),
                source: e,
            })?;
        }
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Copies each source file into the managed directory under the
    /// composed name and appends the destination path to `attachments`.
    ///
    /// Missing or uncopyable sources are skipped and reported; the batch
    /// continues. A destination path already present in `attachments` is
    /// not appended again.
    pub fn ingest(
        &self,
        record_id: i64,
        barcode: &str,
        serial: &str,
        sources: &[PathBuf],
        attachments: &mut Vec<String>,
    ) -> IngestReport {
        let mut report = IngestReport::default();

        for source in sources {
            if !source.exists() {
                log::warn!("Attachment source not found: {}", source.display());
                report.skipped.push(SkippedFile {
                    source: source.clone(),
                    reason: "file not found".to_string(),
                });
                continue;
            }

            let original = source
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("attachment");
            let filename = sanitize::attachment_filename(record_id, barcode, serial, original);
            let destination = self.directory.join(&filename);

            if let Err(e) = std::fs::copy(source, &destination) {
                log::warn!("Failed to copy attachment {}: {}", source.display(), e);
                report.skipped.push(SkippedFile {
                    source: source.clone(),
                    reason: e.to_string(),
                });
                continue;
            }

            let dest = destination.to_string_lossy().into_owned();
            if !attachments.contains(&dest) {
                log::info!("Attachment added: {}", dest);
                attachments.push(dest.clone());
                report.stored.push(dest);
            }
        }

        report
    }
}
