//! Typed HTTP calls against the TaskTracker and identity hosts.
//!
//! Every call is a single attempt: the response body is read in full and
//! decoded as JSON, non-2xx responses become [`DispatchError::Http`] and
//! transport failures become [`DispatchError::Network`]. There are no
//! retries and no backoff.

use crate::error::DispatchError;

use common::{HttpStatusCode, RedactedSecret};

use std::net::SocketAddr;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use log::{debug, trace};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::{Value, json};
use url::Url;
use url::form_urlencoded::Serializer as FormSerializer;

pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Placeholder used when the body of an error response cannot be read.
pub const UNREADABLE_BODY: &str = "<cannot-read-body>";

const USER_AGENT: &str = const_format::concatcp!("tasktracker/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    timeout: Duration,
}

impl Dispatcher {
    /// Dispatcher with the given per-invocation timeout and default settings.
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        Self::builder().timeout(timeout).build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET` with bearer authentication.
    pub async fn get_json(&self, url: &Url, token: &RedactedSecret) -> Result<Value, DispatchError> {
        let request = self.authorized(self.client.get(url.clone()), token);
        self.execute("GET", url, request).await
    }

    /// `POST` a JSON body with bearer authentication.
    pub async fn post_json<P>(
        &self,
        url: &Url,
        token: &RedactedSecret,
        payload: &P,
    ) -> Result<Value, DispatchError>
    where
        P: Serialize + ?Sized,
    {
        let body = encode_json(url, payload)?;
        let request = self
            .authorized(self.client.post(url.clone()), token)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute("POST", url, request).await
    }

    /// `PATCH` a JSON body with bearer authentication.
    pub async fn patch_json<P>(
        &self,
        url: &Url,
        token: &RedactedSecret,
        payload: &P,
    ) -> Result<Value, DispatchError>
    where
        P: Serialize + ?Sized,
    {
        let body = encode_json(url, payload)?;
        let request = self
            .authorized(self.client.patch(url.clone()), token)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute("PATCH", url, request).await
    }

    /// `POST` form-encoded fields without authentication.
    pub async fn post_form(
        &self,
        url: &Url,
        fields: &[(&str, &str)],
    ) -> Result<Value, DispatchError> {
        let body = FormSerializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();
        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        self.execute("POST", url, request).await
    }

    fn authorized(&self, request: RequestBuilder, token: &RedactedSecret) -> RequestBuilder {
        request
            .bearer_auth(token.expose())
            .header(ACCEPT, JSON_CONTENT_TYPE)
    }

    async fn execute(
        &self,
        method: &str,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<Value, DispatchError> {
        debug!("Sending {method} {url}");

        let response = request
            .send()
            .await
            .map_err(|e| DispatchError::from_reqwest(url.as_str(), &e))?;

        let status = HttpStatusCode::from(response.status().as_u16());
        debug!("Received HTTP {status} for {method} {url}");

        if !status.is_success() {
            let reason = reason_phrase(&response);
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());

            return Err(DispatchError::http(url.as_str(), status.as_u16(), reason, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::from_reqwest(url.as_str(), &e))?;

        trace!("Response body ({} bytes) from {url}", body.len());

        decode_body(url, status.as_u16(), &body)
    }
}

/// Reason phrase from the status line as sent by the server.
///
/// hyper only records the phrase when it differs from the canonical one, so
/// the canonical phrase is the fallback.
fn reason_phrase(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .unwrap_or_default()
}

/// Decode a successful response body.
///
/// An empty body is replaced by `{"status": <code>}` so callers always
/// receive a JSON value.
pub fn decode_body(url: &Url, status: u16, body: &str) -> Result<Value, DispatchError> {
    if body.trim().is_empty() {
        return Ok(json!({ "status": status }));
    }

    serde_json::from_str(body).map_err(|e| DispatchError::json(url.as_str(), &e))
}

fn encode_json<P>(url: &Url, payload: &P) -> Result<Vec<u8>, DispatchError>
where
    P: Serialize + ?Sized,
{
    // serde_json writes UTF-8 as-is; non-ASCII text is never \u-escaped
    serde_json::to_vec(payload).map_err(|e| DispatchError::json(url.as_str(), &e))
}

/// Builder for [`Dispatcher`].
#[derive(Debug)]
pub struct DispatcherBuilder {
    timeout: Duration,
    resolve: Vec<(String, SocketAddr)>,
    no_proxy: bool,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_DURATION,
            resolve: Vec::new(),
            no_proxy: false,
        }
    }
}

impl DispatcherBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin a host name to an address, bypassing DNS.
    ///
    /// The port of `addr` is ignored; the port in the request URL wins.
    pub fn resolve(mut self, domain: impl Into<String>, addr: SocketAddr) -> Self {
        self.resolve.push((domain.into(), addr));
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn build(self) -> Result<Dispatcher, DispatchError> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        for (domain, addr) in &self.resolve {
            builder = builder.resolve(domain, *addr);
        }

        if self.no_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| DispatchError::from_reqwest("", &e))?;

        Ok(Dispatcher {
            client,
            timeout: self.timeout,
        })
    }
}
