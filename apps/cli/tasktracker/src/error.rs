use tasktracker_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors raised by the binary around a command run.
///
/// Command failures themselves arrive as [`CoreError`]; the other variants
/// cover process setup and writing the result.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Logger Error: {message}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Runtime Error: {message}")]
    Runtime {
        message: String,
        location: ErrorLocation,
    },

    #[error("Output Error: {message}")]
    Output {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn runtime(message: impl Into<String>) -> Self {
        CliError::Runtime {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn output(message: impl Into<String>) -> Self {
        CliError::Output {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            CliError::Logger { location, .. }
            | CliError::Runtime { location, .. }
            | CliError::Output { location, .. } => location,
            CliError::Core(e) => e.location(),
        }
    }
}
