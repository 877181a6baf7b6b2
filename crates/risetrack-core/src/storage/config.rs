//! TOML-based application configuration.
//!
//! Stores the streak defaults used when a query omits them, and the HTTP
//! server bind address. Configuration is stored at
//! `~/.config/risetrack/config.toml` and written with defaults on first
//! load.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::record::hhmm;

/// Streak defaults applied when a query omits the target or tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(with = "hhmm", default = "default_target_time")]
    pub target_time: NaiveTime,
    #[serde(default)]
    pub tolerance_min: i32,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/risetrack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_target_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            target_time: default_target_time(),
            tolerance_min: 0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            streak: StreakConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default config on first use.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let mut current = &root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, coercing the string to the
    /// type of the existing value.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut root = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (parents.split('.').collect::<Vec<_>>(), leaf),
            None => (Vec::new(), key),
        };

        let mut current = &mut root;
        for part in parents {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }
        let object = current.as_object_mut().ok_or_else(unknown)?;
        let existing = object.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<i64>()
                    .map_err(|e| invalid(e.to_string()))?
                    .into(),
            ),
            _ => serde_json::Value::String(value.to_string()),
        };
        object.insert(leaf.to_string(), new_value);

        *self = serde_json::from_value(root).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.streak.target_time, default_target_time());
        assert_eq!(config.streak.tolerance_min, 0);
        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("target_time = \"07:00\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.streak.target_time, config.streak.target_time);
        assert_eq!(parsed.server.bind, config.server.bind);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.streak.tolerance_min, 0);
        assert_eq!(parsed.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_get_by_dot_path() {
        let config = Config::default();
        assert_eq!(config.get("streak.target_time").unwrap(), "07:00");
        assert_eq!(config.get("streak.tolerance_min").unwrap(), "0");
        assert!(config.get("streak.nope").is_none());
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_set_coerces_to_existing_type() {
        let mut config = Config::default();
        config.set("streak.tolerance_min", "15").unwrap();
        assert_eq!(config.streak.tolerance_min, 15);

        config.set("streak.target_time", "06:30").unwrap();
        assert_eq!(
            config.streak.target_time,
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );

        assert!(config.set("streak.tolerance_min", "ten").is_err());
        assert!(config.set("streak.target_time", "late").is_err());
        assert!(config.set("unknown.key", "1").is_err());
    }
}
