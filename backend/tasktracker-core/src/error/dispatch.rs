//! Error types for HTTP request dispatch.
//!
//! - HTTP status codes stored directly (not parsed from strings)
//! - Transport failures keep the full source chain as their reason
//! - All errors include ErrorLocation for debugging; it is logged, not displayed

use crate::error::ErrorCategory;

use common::{ErrorLocation, HttpStatusCode};

use std::error::Error as StdError;
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("HTTP Error: url={url}, status={status}, reason={reason}")]
    Http {
        url: String,
        status: HttpStatusCode,
        reason: String,
        body: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {url}: {reason}")]
    Network {
        url: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {url}: {message}")]
    Json {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Error: {message}")]
    Request {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl DispatchError {
    /// Create from a non-2xx response.
    #[track_caller]
    pub fn http(
        url: impl Into<String>,
        status: u16,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        DispatchError::Http {
            url: url.into(),
            status: HttpStatusCode(status),
            reason: reason.into(),
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn json(url: impl Into<String>, error: &serde_json::Error) -> Self {
        DispatchError::Json {
            url: url.into(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error raised while sending or reading.
    ///
    /// Builder errors never touched the network and are reported as request
    /// errors; everything else is a transport failure.
    #[track_caller]
    pub fn from_reqwest(url: impl Into<String>, error: &reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if error.is_builder() {
            return DispatchError::Request {
                message: error_chain(error),
                location,
            };
        }

        DispatchError::Network {
            url: url.into(),
            reason: error_chain(error),
            location,
        }
    }

    /// A request that could not be sent because its host cannot be addressed.
    #[track_caller]
    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::Network {
            url: url.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DispatchError::Http { .. } => ErrorCategory::Http,
            DispatchError::Network { .. } => ErrorCategory::Network,
            DispatchError::Json { .. } => ErrorCategory::Execution,
            DispatchError::Request { .. } => ErrorCategory::Execution,
            DispatchError::UrlParse { .. } => ErrorCategory::Execution,
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            DispatchError::Http { location, .. }
            | DispatchError::Network { location, .. }
            | DispatchError::Json { location, .. }
            | DispatchError::Request { location, .. }
            | DispatchError::UrlParse { location, .. } => location,
        }
    }
}

impl From<url::ParseError> for DispatchError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        DispatchError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Join an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request") hides the actual
/// cause (DNS failure, refused connection) in the source chain.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut reason = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }

    reason
}
