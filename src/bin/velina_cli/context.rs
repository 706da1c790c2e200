//! CLI bootstrap: settings assembly, session cookie persistence, and the
//! guard consultation every protected command goes through.

#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use velina::application::error::ActionError;
use velina::application::session::SessionStore;
use velina::config::{CliOverrides, RawSettings, Settings, SettingsError};
use velina::domain::guard;
use velina::domain::types::{Capability, GuardDecision, RedirectTarget};
use velina::infra::api::{ApiClient, ApiError};
use velina::infra::telemetry::TelemetryError;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to access session file {path}: {source}")]
    SessionFile {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Auth(String),
    #[error("not signed in (run `velina-cli auth login` first)")]
    Unauthenticated,
    #[error("admin access required")]
    Forbidden,
    #[error("session is still resolving; retry the command")]
    SessionUnresolved,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn build_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut raw = RawSettings::load(cli.config_file.as_ref())?;
    raw.apply_overrides(&CliOverrides {
        site: cli.site.clone(),
        timeout_secs: cli.timeout_secs,
        session_file: cli.session_file.clone(),
        log_level: cli.log_level.clone(),
        log_json: cli.log_json.then_some(true),
    });
    Ok(Settings::from_raw(raw)?)
}

pub struct Ctx {
    pub store: SessionStore,
    session_file: Option<PathBuf>,
}

impl Ctx {
    pub fn new(settings: &Settings) -> Result<Self, CliError> {
        let api = ApiClient::new(settings.site.clone(), settings.http_timeout)?;
        if let Some(path) = &settings.session_file
            && path.exists()
        {
            let cookie = fs::read_to_string(path).map_err(|source| CliError::SessionFile {
                path: path.display().to_string(),
                source,
            })?;
            let cookie = cookie.trim();
            if !cookie.is_empty() {
                api.restore_session_cookie(cookie);
            }
        }
        Ok(Self {
            store: SessionStore::new(api),
            session_file: settings.session_file.clone(),
        })
    }

    pub fn api(&self) -> &ApiClient {
        self.store.api()
    }

    /// Persist the current session cookie so later invocations can resume it.
    pub fn persist_session(&self) -> Result<(), CliError> {
        let (Some(path), Some(cookie)) = (&self.session_file, self.api().session_cookie()) else {
            return Ok(());
        };
        fs::write(path, cookie).map_err(|source| CliError::SessionFile {
            path: path.display().to_string(),
            source,
        })
    }

    /// Drop the persisted cookie; a missing file is fine.
    pub fn clear_session(&self) -> Result<(), CliError> {
        let Some(path) = &self.session_file else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CliError::SessionFile {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Resolve the session and consult the guard; a redirect decision becomes
    /// a command failure instead of a page navigation.
    pub async fn require(&self, capability: Capability) -> Result<(), CliError> {
        self.store.initialize().await;
        match guard::evaluate(&self.store.snapshot(), capability) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Defer => Err(CliError::SessionUnresolved),
            GuardDecision::Redirect(RedirectTarget::Login) => Err(CliError::Unauthenticated),
            GuardDecision::Redirect(RedirectTarget::Home) => Err(CliError::Forbidden),
        }
    }
}
