pub mod auth;
pub mod config;
pub mod dispatch;
pub mod execution;
pub mod validation;

pub use auth::AuthError;
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use execution::ExecutionError;
pub use validation::ValidationError;

use common::ErrorLocation;

use thiserror::Error;

/// Coarse error classes; each maps to one diagnostic line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Config,
    Http,
    Network,
    Execution,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Config => "config",
            ErrorCategory::Http => "http",
            ErrorCategory::Network => "network",
            ErrorCategory::Execution => "execution",
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::Validation(_) => ErrorCategory::Validation,
            CoreError::Config(e) => e.category(),
            CoreError::Auth(e) => e.category(),
            CoreError::Dispatch(e) => e.category(),
            CoreError::Execution(_) => ErrorCategory::Execution,
        }
    }

    /// Where the error was raised. Kept out of `Display`; diagnostics show
    /// only the message and the location goes to the debug log.
    pub fn location(&self) -> &ErrorLocation {
        match self {
            CoreError::Validation(e) => e.location(),
            CoreError::Config(e) => e.location(),
            CoreError::Auth(e) => e.location(),
            CoreError::Dispatch(e) => e.location(),
            CoreError::Execution(e) => e.location(),
        }
    }

    /// The dispatch failure behind this error, if any.
    ///
    /// Token exchange failures arrive wrapped in [`AuthError`]; both paths
    /// are unwrapped here so HTTP and network failures report identically.
    pub fn dispatch_error(&self) -> Option<&DispatchError> {
        match self {
            CoreError::Dispatch(e) => Some(e),
            CoreError::Auth(AuthError::Dispatch(e)) => Some(e),
            _ => None,
        }
    }
}
