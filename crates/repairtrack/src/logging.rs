//! Activity logging controlled by [`Settings`].
//!
//! Modules emit records through the `log` macros; when logging is enabled
//! a `tracing-subscriber` writer appends them to the configured file, with
//! the `tracing-log` bridge forwarding `log` records into `tracing`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use crate::error::ConfigError;
use crate::settings::Settings;

/// Installs the global subscriber according to `settings`.
///
/// When logging is disabled this is a no-op. Re-initialization (e.g. after
/// the settings dialog rewrites the file path) is tolerated: the first
/// installed subscriber stays in place for the process lifetime.
pub fn init(settings: &Settings) -> Result<(), ConfigError> {
    if !settings.log_enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .map_err(|e| ConfigError::OpenLogFile {
            path: settings.log_file.clone(),
            source: e,
        })?;

    // Forward `log` records into `tracing`. Fails if already installed.
    let _ = tracing_log::LogTracer::init();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(())
}
