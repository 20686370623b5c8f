pub mod controller;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod sanitize;
pub mod settings;
pub mod storage;
pub mod validate;

pub use controller::{
    AttachmentEntry, Controller, CreateOutcome, FieldChange, UpdateOutcome, UpdatePlan,
};
pub use db::device_repo::SearchFilter;
pub use db::Database;
pub use error::{
    ConfigError, ExportError, Result, StorageError, TrackerError, ValidationError,
};
pub use record::{DeviceFields, DeviceRecord, DEVICE_TYPES, STATUSES};
pub use settings::Settings;
pub use storage::{AttachmentStore, IngestReport, SkippedFile};
