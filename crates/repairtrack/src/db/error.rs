use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Migration v{version} failed: {reason}")]
    Migration { version: u32, reason: String },

    #[error("Failed to encode attachment list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}
