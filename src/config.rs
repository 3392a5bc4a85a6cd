//! Application configuration: an optional TOML file plus environment overrides.

use crate::models::SessionSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid {key} value: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    /// Settings new sessions start with.
    pub session: SessionSettings,
    /// Sessions untouched for this long are dropped.
    pub inactivity_timeout_hours: u64,
    /// When set, sessions are saved here after every change and reloaded at start.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            session: SessionSettings::default(),
            inactivity_timeout_hours: 12,
            snapshot_dir: None,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl AppConfig {
    /// `CONFIG_FILE` (if set) then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply overrides looked up by environment-variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse("PORT", port)?;
        }
        if let Some(count) = lookup("COURT_COUNT") {
            self.session.court_count = parse("COURT_COUNT", count)?;
        }
        if let Some(selection) = lookup("SELECTION_STRATEGY") {
            self.session.selection = parse("SELECTION_STRATEGY", selection)?;
        }
        if let Some(split) = lookup("TEAM_SPLIT") {
            self.session.team_split = parse("TEAM_SPLIT", split)?;
        }
        if let Some(rotation) = lookup("ROTATION_POLICY") {
            self.session.rotation = parse("ROTATION_POLICY", rotation)?;
        }
        if let Some(position) = lookup("JOIN_POSITION") {
            self.session.join_position = parse("JOIN_POSITION", position)?;
        }
        if let Some(hours) = lookup("INACTIVITY_TIMEOUT_HOURS") {
            self.inactivity_timeout_hours = parse("INACTIVITY_TIMEOUT_HOURS", hours)?;
        }
        if let Some(dir) = lookup("SNAPSHOT_DIR") {
            self.snapshot_dir = Some(PathBuf::from(dir)).filter(|d| !d.as_os_str().is_empty());
        }
        Ok(())
    }
}
