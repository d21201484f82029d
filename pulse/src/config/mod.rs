//! Configuration file and environment overrides.
//!
//! Settings live in an INI file at `~/.config/pulse/config.ini` (or the
//! platform equivalent). Environment variables, optionally loaded from a
//! `.env` file, override individual values:
//!
//! | Variable              | Setting            |
//! |-----------------------|--------------------|
//! | `OPENWEATHER_API_KEY` | `weather.api_key`  |
//! | `WEATHER_CITY`        | `weather.city`     |
//! | `CRYPTO_COINS`        | `crypto.coins`     |
//! | `GITHUB_USERNAME`     | `activity.username`|
//! | `GITHUB_TOKEN`        | `activity.token`   |
//!
//! ```ini
//! [weather]
//! api_key = 0123abcd
//! city = Istanbul
//!
//! [crypto]
//! coins = bitcoin, ethereum, solana
//!
//! [activity]
//! username = TRINITY-21
//!
//! [dashboard]
//! poll_hidden_panels = true
//! ```

mod keys;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;
use tracing::debug;

pub use keys::ConfigKey;

/// Default city for the weather panel.
pub const DEFAULT_CITY: &str = "Istanbul";

/// Default coins for the crypto panel.
pub const DEFAULT_COINS: &[&str] = &["bitcoin", "ethereum", "solana"];

/// Default GitHub user for the activity panel.
pub const DEFAULT_USERNAME: &str = "TRINITY-21";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl From<ini::Error> for ConfigError {
    fn from(err: ini::Error) -> Self {
        match err {
            ini::Error::Io(e) => ConfigError::Io(e),
            ini::Error::Parse(e) => ConfigError::Parse(e.to_string()),
        }
    }
}

/// OpenWeatherMap settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub city: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            city: DEFAULT_CITY.to_string(),
        }
    }
}

/// CoinGecko settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoSettings {
    /// CoinGecko coin ids, in display order.
    pub coins: Vec<String>,
}

impl Default for CryptoSettings {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// GitHub activity settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySettings {
    pub username: String,
    /// Optional token; raises the API rate limit.
    pub token: Option<String>,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            token: None,
        }
    }
}

/// Dashboard behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Keep polling panels while they are hidden.
    pub poll_hidden_panels: bool,
    /// Where `pulse.log` is written; defaults to the platform cache dir.
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll_hidden_panels: true,
            log_dir: None,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub weather: WeatherSettings,
    pub crypto: CryptoSettings,
    pub activity: ActivitySettings,
    pub dashboard: DashboardSettings,
}

/// Directory holding `config.ini` and an optional `.env`.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pulse")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// Load `.env` files into the process environment.
///
/// The user-level file in the config directory is read first, then `.env`
/// in the working directory. Variables already set are never overwritten.
pub fn load_env_files() {
    let user_env = config_directory().join(".env");
    if user_env.exists() && dotenvy::from_path(&user_env).is_ok() {
        debug!(path = %user_env.display(), "Loaded environment file");
    }
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded environment file");
    }
}

/// Split a comma-separated coin list, dropping blanks.
pub fn parse_coins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Parse a boolean setting.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ConfigFile {
    /// Load from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Build from parsed INI data; unset keys keep their defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Serialize every setting; unset optional values are omitted.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    /// Write to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are
    /// ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).as_deref().and_then(non_empty);

        if let Some(key) = var("OPENWEATHER_API_KEY") {
            self.weather.api_key = Some(key);
        }
        if let Some(city) = var("WEATHER_CITY") {
            self.weather.city = city;
        }
        if let Some(coins) = var("CRYPTO_COINS") {
            let coins = parse_coins(&coins);
            if !coins.is_empty() {
                self.crypto.coins = coins;
            }
        }
        if let Some(username) = var("GITHUB_USERNAME") {
            self.activity.username = username;
        }
        if let Some(token) = var("GITHUB_TOKEN") {
            self.activity.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.weather.city, "Istanbul");
        assert_eq!(config.weather.api_key, None);
        assert_eq!(config.crypto.coins, vec!["bitcoin", "ethereum", "solana"]);
        assert_eq!(config.activity.username, "TRINITY-21");
        assert!(config.dashboard.poll_hidden_panels);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.weather.api_key = Some("abc123".to_string());
        config.weather.city = "Lisbon".to_string();
        config.crypto.coins = vec!["dogecoin".to_string()];
        config.dashboard.poll_hidden_panels = false;
        config.dashboard.log_dir = Some(PathBuf::from("/tmp/pulse-logs"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[crypto]\ncoins = Cardano,  polkadot ,\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.crypto.coins, vec!["cardano", "polkadot"]);
        assert_eq!(config.weather.city, DEFAULT_CITY);
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[dashboard]\npoll_hidden_panels = maybe\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("OPENWEATHER_API_KEY", "env-key"),
            ("WEATHER_CITY", "Oslo"),
            ("CRYPTO_COINS", "ripple"),
            ("GITHUB_USERNAME", "octocat"),
            ("GITHUB_TOKEN", ""),
        ]
        .into_iter()
        .collect();

        let config = ConfigFile::default()
            .apply_env_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.weather.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.weather.city, "Oslo");
        assert_eq!(config.crypto.coins, vec!["ripple"]);
        assert_eq!(config.activity.username, "octocat");
        assert_eq!(config.activity.token, None);
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("sure"), None);
    }

    #[test]
    fn test_config_path_ends_with_pulse_ini() {
        let path = config_file_path();
        assert!(path.ends_with("pulse/config.ini"));
    }
}
