use crate::error::ErrorCategory;

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Error: Base URL is required: pass --erp-base-url or set erp_base_url in .env")]
    MissingBaseUrl { location: ErrorLocation },

    #[error("Config Error: projectId is required: pass --project-id or set erp_tasktracker_project_id in .env")]
    MissingProjectId { location: ErrorLocation },

    #[error("Config Error: {key} {reason}")]
    InvalidValue {
        key: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Env File Error: {path}: {message}")]
    EnvFile {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn missing_base_url() -> Self {
        ConfigError::MissingBaseUrl {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_project_id() -> Self {
        ConfigError::MissingProjectId {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn env_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::EnvFile {
            path: path.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            ConfigError::MissingBaseUrl { location }
            | ConfigError::MissingProjectId { location }
            | ConfigError::InvalidValue { location, .. }
            | ConfigError::EnvFile { location, .. } => location,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            // An unreadable dotfile is an I/O failure, not a missing setting
            ConfigError::EnvFile { .. } => ErrorCategory::Execution,
            _ => ErrorCategory::Config,
        }
    }
}
