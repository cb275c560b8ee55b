//! Error types for token acquisition.

use crate::error::{DispatchError, ErrorCategory};

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Config Error: Missing env vars: erp_client_id and/or erp_client_secret")]
    MissingCredentials { location: ErrorLocation },

    #[error("Token Error: Token response does not contain access_token")]
    TokenMissing { location: ErrorLocation },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl AuthError {
    #[track_caller]
    pub fn missing_credentials() -> Self {
        AuthError::MissingCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_missing() -> Self {
        AuthError::TokenMissing {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            AuthError::MissingCredentials { location } | AuthError::TokenMissing { location } => {
                location
            }
            AuthError::Dispatch(e) => e.location(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthError::MissingCredentials { .. } => ErrorCategory::Config,
            AuthError::TokenMissing { .. } => ErrorCategory::Execution,
            AuthError::Dispatch(e) => e.category(),
        }
    }
}
