//! OAuth2 client-credentials token exchange.
//!
//! A fresh token is fetched on every invocation; nothing is cached.

use crate::dispatch::Dispatcher;
use crate::error::{AuthError, DispatchError};

use common::RedactedSecret;

use std::env;

use log::{debug, info};
use serde_json::Value;
use url::Url;

pub const TOKEN_ENDPOINT_PATH: &str = "/oidc/connect/token";
pub const CLIENT_ID_ENV: &str = "erp_client_id";
pub const CLIENT_SECRET_ENV: &str = "erp_client_secret";

const GRANT_TYPE: &str = "client_credentials";
const ACCESS_TOKEN_FIELD: &str = "access_token";

/// Client credentials for the identity provider.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: RedactedSecret,
}

impl Credentials {
    /// Build credentials from optional parts.
    ///
    /// # Errors
    /// [`AuthError::MissingCredentials`] when either part is absent or empty.
    #[track_caller]
    pub fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, AuthError> {
        match (client_id, client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok(Self {
                client_id: id,
                client_secret: RedactedSecret::new(secret),
            }),
            _ => Err(AuthError::missing_credentials()),
        }
    }

    /// Read `erp_client_id` / `erp_client_secret` through `lookup`.
    #[track_caller]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_parts(lookup(CLIENT_ID_ENV), lookup(CLIENT_SECRET_ENV))
    }

    /// Read credentials from the process environment.
    #[track_caller]
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &RedactedSecret {
        &self.client_secret
    }
}

/// Exchange client credentials for a bearer token.
///
/// POSTs `grant_type=client_credentials` to `{auth_base}/oidc/connect/token`.
/// HTTP and network failures propagate unchanged inside [`AuthError::Dispatch`].
/// An identity origin that cannot be addressed at all (e.g. `id-127.0.0.1`)
/// fails as a network error without sending anything.
pub async fn get_token(
    dispatcher: &Dispatcher,
    auth_base: &str,
    credentials: &Credentials,
) -> Result<RedactedSecret, AuthError> {
    let raw_url = format!("{}{TOKEN_ENDPOINT_PATH}", auth_base.trim_end_matches('/'));
    let token_url = match Url::parse(&raw_url) {
        Ok(token_url) => token_url,
        Err(e) => {
            return Err(DispatchError::unreachable(
                raw_url,
                format!("cannot resolve identity host: {e}"),
            )
            .into());
        }
    };

    debug!(
        "Requesting token from {token_url} for client '{}'",
        credentials.client_id()
    );

    let fields = [
        ("grant_type", GRANT_TYPE),
        ("client_id", credentials.client_id()),
        ("client_secret", credentials.client_secret().expose()),
    ];

    let response = dispatcher.post_form(&token_url, &fields).await?;

    let token = extract_access_token(&response).ok_or_else(|| AuthError::token_missing())?;

    info!("Obtained access token ({} chars)", token.len());

    Ok(RedactedSecret::new(token))
}

/// Pull `access_token` out of a token response.
///
/// Strings and numbers are accepted; anything else (absent, null, empty)
/// counts as missing.
pub fn extract_access_token(response: &Value) -> Option<String> {
    match response.get(ACCESS_TOKEN_FIELD)? {
        Value::String(token) if !token.is_empty() => Some(token.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
