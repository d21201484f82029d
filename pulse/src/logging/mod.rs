//! File-based tracing setup.
//!
//! The dashboard owns the terminal, so log output goes to `pulse.log` in the
//! log directory instead of stderr. Filtering follows the `PULSE_LOG`
//! environment variable using the usual `EnvFilter` directive syntax.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "PULSE_LOG";

/// Filter used when `PULSE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "pulse=info,pulse_cli=info";

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "pulse.log";

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Keeps the background log writer alive; logs are flushed when dropped.
#[must_use = "dropping the guard stops log output"]
pub struct LoggingGuard {
    _guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the log file being written.
    pub fn log_file(&self) -> &Path {
        &self.path
    }
}

/// Default log directory: the platform cache dir, e.g. `~/.cache/pulse`.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pulse")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Remove the previous session's log so each run starts with a fresh file.
///
/// A missing file is not an error.
fn clear_previous_log(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Install the global subscriber writing to `<log_dir>/pulse.log`.
///
/// The file is truncated on each start. Can only succeed once per process.
pub fn init_logging(log_dir: &Path) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let path = log_dir.join(LOG_FILE_NAME);
    // The subscriber is not installed yet, so this can only go to stderr.
    if let Err(e) = clear_previous_log(&path) {
        eprintln!(
            "Warning: could not remove old log {}: {}; appending to it",
            path.display(),
            e
        );
    }

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(LocalTime::new(
            time::format_description::well_known::Rfc3339,
        ))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::info!(version = crate::VERSION, path = %path.display(), "Logging initialized");

    Ok(LoggingGuard {
        _guard: guard,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_log_dir_is_named_pulse() {
        assert!(default_log_dir().ends_with("pulse"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_clear_previous_log_removes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "old session").unwrap();

        clear_previous_log(&path).unwrap();
        assert!(!path.exists());
        // Nothing left to remove is fine.
        clear_previous_log(&path).unwrap();
    }

    #[test]
    fn test_clear_previous_log_reports_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOG_FILE_NAME);
        std::fs::create_dir(&path).unwrap();

        assert!(clear_previous_log(&path).is_err());
        assert!(path.exists());
    }

    #[test]
    fn test_create_dir_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = init_logging(&file.join("logs")).err().unwrap();
        assert!(matches!(err, LoggingError::CreateDir { .. }));
    }
}
