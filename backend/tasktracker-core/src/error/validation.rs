use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Validation Error: {message}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid URL Error: {message}: {url}")]
    InvalidUrl {
        message: String,
        url: String,
        location: ErrorLocation,
    },
}

impl ValidationError {
    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ValidationError::InvalidInput {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        ValidationError::InvalidUrl {
            message: message.into(),
            url: url.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            ValidationError::InvalidInput { location, .. }
            | ValidationError::InvalidUrl { location, .. } => location,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::InvalidInput { message, .. } => message,
            ValidationError::InvalidUrl { message, .. } => message,
        }
    }
}
