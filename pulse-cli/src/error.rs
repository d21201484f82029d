//! CLI error types.

use std::fmt;

use pulse::config::ConfigError;
use pulse::logging::LoggingError;
use pulse::source::FetchError;

/// Errors that end the program with exit code 1.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be read, parsed or written.
    Config(String),

    /// Logging could not be set up.
    Logging(LoggingError),

    /// The terminal is unavailable or could not be put into raw mode.
    Terminal(String),

    /// The HTTP client could not be created.
    Http(FetchError),

    /// Other I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Failed to set up logging: {}", e),
            CliError::Terminal(msg) => write!(f, "Terminal error: {}", msg),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Config(_) | CliError::Terminal(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
