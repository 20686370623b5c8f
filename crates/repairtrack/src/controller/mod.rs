//! The form-and-list controller.
//!
//! Carries the two pieces of interface state — which record is selected
//! for update/delete, and the attachment sources chosen but not yet
//! persisted — and drives validation, the record store, the attachment
//! store, and the export. Update runs in two steps (prepare, then apply)
//! so the shell can show the changed-field confirmation dialog in between.

pub mod diff;

pub use diff::FieldChange;

use std::path::{Path, PathBuf};

use crate::db::{device_repo, Database};
use crate::db::device_repo::SearchFilter;
use crate::error::{Result, TrackerError};
use crate::export;
use crate::record::{DeviceFields, DeviceRecord};
use crate::storage::{AttachmentStore, IngestReport, SkippedFile};
use crate::validate;

/// Result of creating a record.
#[derive(Debug)]
pub struct CreateOutcome {
    pub id: i64,
    pub attachments: IngestReport,
}

/// Result of preparing an update.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// No field differs from the stored row; nothing was written.
    NoChanges,
    /// Changes found — show them to the user, then `apply_update`.
    Pending(UpdatePlan),
}

/// A validated, staged update waiting for confirmation. Attachment files
/// have already been copied into the managed directory; dropping the plan
/// leaves the record row untouched.
#[derive(Debug)]
pub struct UpdatePlan {
    id: i64,
    fields: DeviceFields,
    attachments: Vec<String>,
    pub changes: Vec<FieldChange>,
    pub skipped: Vec<SkippedFile>,
}

impl UpdatePlan {
    pub fn record_id(&self) -> i64 {
        self.id
    }
}

/// One row of the attachment browser, keyed by barcode across all service
/// cycles.
#[derive(Debug, Clone)]
pub struct AttachmentEntry {
    pub record_id: i64,
    pub sent_date: String,
    pub path: String,
}

impl AttachmentEntry {
    /// The filename shown in the browser list.
    pub fn display_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.path)
    }
}

pub struct Controller {
    db: Database,
    store: AttachmentStore,
    selected: Option<i64>,
    staged: Vec<PathBuf>,
}

impl Controller {
    pub fn new(db: Database, store: AttachmentStore) -> Self {
        Self {
            db,
            store,
            selected: None,
            staged: Vec::new(),
        }
    }

    /// Loads a record into the form and marks it selected. Staged files
    /// from a previous selection are discarded.
    pub fn select(&mut self, id: i64) -> Result<DeviceRecord> {
        let record =
            device_repo::find_by_id(&self.db, id)?.ok_or(TrackerError::RecordNotFound(id))?;
        self.selected = Some(id);
        self.staged.clear();
        Ok(record)
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Stages source files for the next create or update.
    pub fn stage_attachments<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.staged.extend(paths);
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Clears the selection and any staged files (the form reset action).
    pub fn reset(&mut self) {
        self.selected = None;
        self.staged.clear();
    }

    /// Validates and persists a new record, then ingests any staged
    /// attachment files and stores their destination paths.
    pub fn create(&mut self, mut fields: DeviceFields) -> Result<CreateOutcome> {
        fields.note = validate::clamp_note(&fields.note);
        validate::validate_fields(&fields)?;

        let id = device_repo::insert(&self.db, &fields, &[])?;

        let mut attachments = Vec::new();
        let report = self.store.ingest(
            id,
            &fields.barcode,
            &fields.serial_number,
            &self.staged,
            &mut attachments,
        );
        if !attachments.is_empty() {
            device_repo::update(&self.db, id, &fields, &attachments)?;
        }

        self.reset();
        Ok(CreateOutcome {
            id,
            attachments: report,
        })
    }

    /// Validates the edited fields, ingests staged files into a copy of
    /// the stored attachment list, and computes the changed-field diff.
    ///
    /// Returns [`UpdateOutcome::NoChanges`] — with no write — when nothing
    /// differs from the stored row.
    pub fn prepare_update(&mut self, mut fields: DeviceFields) -> Result<UpdateOutcome> {
        let id = self.selected.ok_or(TrackerError::NothingSelected)?;

        fields.note = validate::clamp_note(&fields.note);
        validate::validate_fields(&fields)?;

        let current =
            device_repo::find_by_id(&self.db, id)?.ok_or(TrackerError::RecordNotFound(id))?;

        let mut attachments = current.attachments.clone();
        let report = self.store.ingest(
            id,
            &fields.barcode,
            &fields.serial_number,
            &self.staged,
            &mut attachments,
        );

        let changes = diff::compute_changes(&current, &fields, attachments.len());
        if changes.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }

        Ok(UpdateOutcome::Pending(UpdatePlan {
            id,
            fields,
            attachments,
            changes,
            skipped: report.skipped,
        }))
    }

    /// Commits a confirmed update and clears the selection.
    pub fn apply_update(&mut self, plan: UpdatePlan) -> Result<Vec<FieldChange>> {
        device_repo::update(&self.db, plan.id, &plan.fields, &plan.attachments)?;
        self.reset();
        Ok(plan.changes)
    }

    /// Deletes the selected record. Attachment files stay on disk.
    pub fn delete_selected(&mut self) -> Result<i64> {
        let id = self.selected.ok_or(TrackerError::NothingSelected)?;
        device_repo::delete(&self.db, id)?;
        self.reset();
        Ok(id)
    }

    /// Removes one attachment, identified by its displayed filename, from
    /// the record's list and persists the shortened list. The copied file
    /// itself is left on disk.
    pub fn remove_attachment(&mut self, record_id: i64, display_name: &str) -> Result<()> {
        let record = device_repo::find_by_id(&self.db, record_id)?
            .ok_or(TrackerError::RecordNotFound(record_id))?;

        let mut attachments = record.attachments.clone();
        attachments.retain(|p| {
            Path::new(p).file_name().and_then(|n| n.to_str()) != Some(display_name)
        });

        if attachments.len() == record.attachments.len() {
            // Nothing matched; the list is already as displayed.
            return Ok(());
        }

        device_repo::update(&self.db, record_id, &record.fields, &attachments)?;
        log::info!(
            "Attachment removed from record {}: {}",
            record_id,
            display_name
        );
        Ok(())
    }

    /// All attachments across every service cycle for `barcode`, in the
    /// order the records and files were added.
    pub fn browse_attachments(&self, barcode: &str) -> Result<Vec<AttachmentEntry>> {
        let mut entries = Vec::new();
        for record in device_repo::find_by_barcode(&self.db, barcode)? {
            for path in &record.attachments {
                entries.push(AttachmentEntry {
                    record_id: record.id,
                    sent_date: record.fields.sent_date.clone(),
                    path: path.clone(),
                });
            }
        }
        Ok(entries)
    }

    /// The list view contents for a substring filter.
    pub fn list(&self, filter: &str) -> Result<Vec<DeviceRecord>> {
        Ok(device_repo::list(&self.db, filter)?)
    }

    /// The list view contents for an advanced search.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<DeviceRecord>> {
        Ok(device_repo::search(&self.db, filter)?)
    }

    /// Exports the currently displayed rows to a timestamped CSV file in
    /// `directory`, returning the path written.
    pub fn export(&self, rows: &[DeviceRecord], directory: &Path) -> Result<PathBuf> {
        Ok(export::write_csv(rows, directory)?)
    }
}
