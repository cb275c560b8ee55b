//! Base URL derivation and client-credentials token exchange.
//!
//! The identity provider lives on a sibling host of the TaskTracker
//! instance: `erp.example.com` authenticates against `id-erp.example.com`.

pub mod token;

pub use token::{CLIENT_ID_ENV, CLIENT_SECRET_ENV, Credentials, TOKEN_ENDPOINT_PATH, get_token};

use crate::error::ValidationError;

use log::debug;
use url::Url;

/// Host prefix of the identity provider.
pub const AUTH_HOST_PREFIX: &str = "id-";

pub const INVALID_BASE_URL_MESSAGE: &str = "Invalid base URL";
pub const INVALID_TASKTRACKER_URL_MESSAGE: &str = "Invalid TaskTracker URL";

/// Resource host and its identity-provider counterpart.
///
/// Both carry scheme and authority only; any path, query or fragment of the
/// input is dropped. The identity origin is kept as text: it is never parsed,
/// so an IP-literal resource host still yields `id-<ip>` and any failure to
/// reach it surfaces when the token request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    pub resource_base: Url,
    pub auth_base: String,
}

impl BaseUrls {
    /// `scheme://host[:port]` of the resource host, without a trailing slash.
    pub fn resource_origin(&self) -> String {
        self.resource_base.as_str().trim_end_matches('/').to_string()
    }

    /// `scheme://host[:port]` of the identity host, without a trailing slash.
    pub fn auth_origin(&self) -> &str {
        &self.auth_base
    }

    /// Resolve an absolute API path against the resource host.
    pub fn resource_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.resource_base.join(path)
    }
}

/// Derive the resource and identity base URLs from any URL on the resource host.
///
/// # Errors
/// Returns [`ValidationError::InvalidUrl`] carrying `invalid_message` when the
/// input has no scheme or no host.
#[track_caller]
pub fn derive_base_urls(url: &str, invalid_message: &str) -> Result<BaseUrls, ValidationError> {
    // Build errors inline; closures lose the caller location
    let Ok(parsed) = Url::parse(url) else {
        return Err(ValidationError::invalid_url(invalid_message, url));
    };

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(ValidationError::invalid_url(invalid_message, url)),
    };

    let authority = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let scheme = parsed.scheme();
    let Ok(resource_base) = Url::parse(&format!("{scheme}://{authority}")) else {
        return Err(ValidationError::invalid_url(invalid_message, url));
    };

    let auth_base = if authority.starts_with(AUTH_HOST_PREFIX) {
        format!("{scheme}://{authority}")
    } else {
        format!("{scheme}://{AUTH_HOST_PREFIX}{authority}")
    };

    debug!("Derived base URLs: resource={resource_base}, auth={auth_base}");

    Ok(BaseUrls {
        resource_base,
        auth_base,
    })
}
