//! Addressable configuration keys for `pulse config get|set|list`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{parse_bool, parse_coins, ConfigError, ConfigFile};

/// A single `section.key` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    WeatherApiKey,
    WeatherCity,
    CryptoCoins,
    ActivityUsername,
    ActivityToken,
    DashboardPollHiddenPanels,
    DashboardLogDir,
}

const ALL_KEYS: &[ConfigKey] = &[
    ConfigKey::WeatherApiKey,
    ConfigKey::WeatherCity,
    ConfigKey::CryptoCoins,
    ConfigKey::ActivityUsername,
    ConfigKey::ActivityToken,
    ConfigKey::DashboardPollHiddenPanels,
    ConfigKey::DashboardLogDir,
];

impl ConfigKey {
    /// Every key, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        ALL_KEYS
    }

    /// Full name, e.g. `weather.api_key`.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::WeatherApiKey => "weather.api_key",
            ConfigKey::WeatherCity => "weather.city",
            ConfigKey::CryptoCoins => "crypto.coins",
            ConfigKey::ActivityUsername => "activity.username",
            ConfigKey::ActivityToken => "activity.token",
            ConfigKey::DashboardPollHiddenPanels => "dashboard.poll_hidden_panels",
            ConfigKey::DashboardLogDir => "dashboard.log_dir",
        }
    }

    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map(|(s, _)| s).unwrap_or("")
    }

    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map(|(_, k)| k).unwrap_or("")
    }

    /// Whether the value should be masked when displayed.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::WeatherApiKey | ConfigKey::ActivityToken)
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::WeatherApiKey => config.weather.api_key.clone().unwrap_or_default(),
            ConfigKey::WeatherCity => config.weather.city.clone(),
            ConfigKey::CryptoCoins => config.crypto.coins.join(","),
            ConfigKey::ActivityUsername => config.activity.username.clone(),
            ConfigKey::ActivityToken => config.activity.token.clone().unwrap_or_default(),
            ConfigKey::DashboardPollHiddenPanels => config.dashboard.poll_hidden_panels.to_string(),
            ConfigKey::DashboardLogDir => config
                .dashboard
                .log_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and store a value. An empty value clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match self {
            ConfigKey::WeatherApiKey => config.weather.api_key = optional(),
            ConfigKey::WeatherCity => {
                if value.is_empty() {
                    return Err(invalid("city cannot be empty"));
                }
                config.weather.city = value.to_string();
            }
            ConfigKey::CryptoCoins => {
                let coins = parse_coins(value);
                if coins.is_empty() {
                    return Err(invalid("expected a comma-separated list of coin ids"));
                }
                config.crypto.coins = coins;
            }
            ConfigKey::ActivityUsername => {
                if value.is_empty() {
                    return Err(invalid("username cannot be empty"));
                }
                config.activity.username = value.to_string();
            }
            ConfigKey::ActivityToken => config.activity.token = optional(),
            ConfigKey::DashboardPollHiddenPanels => {
                config.dashboard.poll_hidden_panels =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            ConfigKey::DashboardLogDir => config.dashboard.log_dir = optional().map(PathBuf::from),
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_KEYS
            .iter()
            .find(|key| key.name() == wanted)
            .copied()
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
