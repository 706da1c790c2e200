//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("api.site must be set (config file, VELINA_API__SITE, or --site)")]
    MissingSite,
    #[error("api.site is not a valid URL: {0}")]
    InvalidSite(#[from] url::ParseError),
    #[error("logging.level `{0}` is not a valid level filter")]
    InvalidLogLevel(String),
}

/// Raw, partially specified settings as read from file and environment.
/// CLI overrides are applied before validation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    pub api: RawApiSettings,
    #[serde(default)]
    pub session: RawSessionSettings,
    #[serde(default)]
    pub logging: RawLoggingSettings,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawApiSettings {
    pub site: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawSessionSettings {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawLoggingSettings {
    pub level: Option<String>,
    pub json: Option<bool>,
}

/// CLI-supplied overrides; these win over both file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub site: Option<String>,
    pub timeout_secs: Option<u64>,
    pub session_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}

impl RawSettings {
    pub fn load(config_file: Option<&PathBuf>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.clone()));
        }
        builder = builder.add_source(Environment::with_prefix("VELINA").separator("__"));
        let raw = builder.build()?.try_deserialize()?;
        Ok(raw)
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if overrides.site.is_some() {
            self.api.site = overrides.site.clone();
        }
        if overrides.timeout_secs.is_some() {
            self.api.timeout_secs = overrides.timeout_secs;
        }
        if overrides.session_file.is_some() {
            self.session.file = overrides.session_file.clone();
        }
        if overrides.log_level.is_some() {
            self.logging.level = overrides.log_level.clone();
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

/// Fully validated settings for one client process.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site: Url,
    pub http_timeout: Duration,
    pub session_file: Option<PathBuf>,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_raw(raw: RawSettings) -> Result<Self, SettingsError> {
        let site = raw.api.site.ok_or(SettingsError::MissingSite)?;
        let site = Url::parse(&site)?.join("/")?;

        let level = match raw.logging.level {
            Some(raw_level) => LevelFilter::from_str(&raw_level)
                .map_err(|_| SettingsError::InvalidLogLevel(raw_level))?,
            None => DEFAULT_LOG_LEVEL,
        };
        let format = if raw.logging.json.unwrap_or(false) {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        Ok(Self {
            site,
            http_timeout: Duration::from_secs(
                raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            session_file: raw.session.file,
            logging: LoggingSettings { level, format },
        })
    }
}

#[cfg(test)]
mod tests;
