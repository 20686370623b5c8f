use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("No record with id {0}")]
    RecordNotFound(i64),

    #[error("No record is selected")]
    NothingSelected,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to open log file '{path}': {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Barcode is required")]
    MissingBarcode,

    #[error("Badge number must be at least 5 digits: '{0}'")]
    InvalidBadgeNumber(String),

    #[error("Invalid {field} date '{value}' (expected dd.mm.yyyy)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Sent date {sent} is after returned date {returned}")]
    DateOrder { sent: String, returned: String },

    #[error("Note exceeds {max} characters (got {len})")]
    NoteTooLong { len: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No rows to export")]
    NothingToExport,

    #[error("Failed to write export file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
