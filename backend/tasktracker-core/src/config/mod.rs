//! Invocation settings resolved once at startup.
//!
//! Precedence for every value: CLI flag, then process environment (which
//! already includes anything loaded from `.env` without overriding), then an
//! error. Values are only *required* when a command actually needs them, so
//! `get --url ...` works without a configured base URL.

use crate::auth::{CLIENT_ID_ENV, CLIENT_SECRET_ENV, Credentials};
use crate::dispatch::DEFAULT_TIMEOUT_DURATION;
use crate::error::{AuthError, ConfigError};

use common::RedactedSecret;

use std::time::Duration;

use log::debug;

/// Environment keys for the base URL, in lookup order.
pub const BASE_URL_ENV_KEYS: [&str; 3] = ["erp_base_url", "ERP_BASE_URL", "erp-base-url"];

/// Environment keys for the default project, in lookup order.
pub const PROJECT_ID_ENV_KEYS: [&str; 4] = [
    "erp_tasktracker_project_id",
    "erp-tasktracker-project-id",
    "project-id",
    "projectId",
];

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub project_id: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    base_url: Option<String>,
    project_id: Option<u64>,
    project_id_env: Option<(String, String)>,
    client_id: Option<String>,
    client_secret: Option<RedactedSecret>,
    timeout: Duration,
}

impl Settings {
    /// Resolve settings from CLI overrides and an environment lookup.
    pub fn resolve<F>(overrides: &SettingsOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = overrides
            .base_url
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| first_non_empty(&lookup, &BASE_URL_ENV_KEYS).map(|(_, value)| value))
            .map(|value| value.trim().to_string());

        let project_id_env = if overrides.project_id.is_some() {
            None
        } else {
            first_non_empty(&lookup, &PROJECT_ID_ENV_KEYS)
        };

        let timeout = overrides
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT_DURATION);

        let settings = Self {
            base_url,
            project_id: overrides.project_id,
            project_id_env,
            client_id: lookup(CLIENT_ID_ENV),
            client_secret: lookup(CLIENT_SECRET_ENV).map(RedactedSecret::new),
            timeout,
        };

        debug!(
            "Resolved settings: base_url={:?}, project_id={:?}, timeout={:?}, client_id set={}",
            settings.base_url,
            settings.project_id,
            settings.timeout,
            settings.client_id.is_some()
        );

        settings
    }

    /// Base URL for commands addressed by ID.
    #[track_caller]
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        match self.base_url.as_deref() {
            Some(base_url) => Ok(base_url),
            None => Err(ConfigError::missing_base_url()),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Project for new tasks: the CLI value, else the first set env key.
    ///
    /// # Errors
    /// [`ConfigError::MissingProjectId`] when neither is set, and
    /// [`ConfigError::InvalidValue`] when the env value is not an integer.
    #[track_caller]
    pub fn require_project_id(&self) -> Result<u64, ConfigError> {
        if let Some(project_id) = self.project_id {
            return Ok(project_id);
        }

        let Some((key, raw)) = &self.project_id_env else {
            return Err(ConfigError::missing_project_id());
        };

        let value = raw.trim();
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::invalid_value(key, "in .env must be an integer"));
        }

        value
            .parse::<u64>()
            .map_err(|_| ConfigError::invalid_value(key, "in .env must be an integer"))
    }

    #[track_caller]
    pub fn credentials(&self) -> Result<Credentials, AuthError> {
        Credentials::from_parts(
            self.client_id.clone(),
            self.client_secret
                .as_ref()
                .map(|secret| secret.expose().to_string()),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn first_non_empty<F>(lookup: &F, keys: &[&str]) -> Option<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter().find_map(|key| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (key.to_string(), value))
    })
}
