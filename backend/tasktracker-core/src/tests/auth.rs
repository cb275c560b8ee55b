// Unit tests for base URL derivation and token extraction
// Network behaviour of get_token is covered in integration_tests/auth.rs

use crate::auth::token::extract_access_token;
use crate::auth::{Credentials, INVALID_BASE_URL_MESSAGE, derive_base_urls};
use crate::error::{AuthError, ValidationError};

use serde_json::json;

/// **VALUE**: The identity host is derived by prefixing `id-` and dropping the path.
///
/// **WHY THIS MATTERS**: Every command authenticates against the derived host.
/// A wrong derivation sends credentials to the wrong server.
///
/// **BUG THIS CATCHES**: Keeping the path component, or forgetting the prefix.
#[test]
fn given_resource_url_with_path_when_derived_then_returns_origin_and_id_host() {
    // GIVEN: A task URL with a path
    let url = "https://erp.example.com/tasktracker/projects/1/tasks/555";

    // WHEN: Deriving base URLs
    let base = derive_base_urls(url, INVALID_BASE_URL_MESSAGE).unwrap();

    // THEN: Resource base is scheme://host and auth base gets the prefix
    assert_eq!(base.resource_origin(), "https://erp.example.com");
    assert_eq!(base.auth_origin(), "https://id-erp.example.com");
    assert_eq!(base.resource_base.path(), "/");
    assert_eq!(base.resource_base.query(), None);
}

/// **VALUE**: Hosts already on the identity provider are not prefixed twice.
///
/// **BUG THIS CATCHES**: Producing `id-id-erp.example.com`.
#[test]
fn given_host_with_id_prefix_when_derived_then_auth_host_is_unchanged() {
    let base = derive_base_urls("https://id-erp.example.com/x?y=1#z", INVALID_BASE_URL_MESSAGE)
        .unwrap();

    assert_eq!(base.resource_origin(), "https://id-erp.example.com");
    assert_eq!(base.auth_origin(), "https://id-erp.example.com");
}

#[test]
fn given_url_with_port_when_derived_then_port_is_kept_on_both_hosts() {
    let base = derive_base_urls("http://erp.local:8080/api", INVALID_BASE_URL_MESSAGE).unwrap();

    assert_eq!(base.resource_origin(), "http://erp.local:8080");
    assert_eq!(base.auth_origin(), "http://id-erp.local:8080");
}

/// **VALUE**: Inputs without scheme or host are rejected with the caller's message.
///
/// **WHY THIS MATTERS**: The message differs per entry point ("Invalid TaskTracker
/// URL" vs "Invalid base URL"); users need to know which flag was wrong.
///
/// **BUG THIS CATCHES**: Accepting `erp.example.com` (no scheme) or `mailto:x`
/// (no host) and then failing later with a confusing network error.
#[test]
fn given_url_without_scheme_or_host_when_derived_then_returns_invalid_url() {
    for input in ["erp.example.com/tasks/1", "mailto:someone", "", "http://", "/tasks/5"] {
        // WHEN: Deriving from an incomplete URL
        let result = derive_base_urls(input, "Invalid TaskTracker URL");

        // THEN: Validation error carrying the caller's message
        match result {
            Err(ValidationError::InvalidUrl { message, .. }) => {
                assert_eq!(message, "Invalid TaskTracker URL", "input: {input:?}");
            }
            other => panic!("expected InvalidUrl for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn given_base_urls_when_resolving_api_path_then_joins_on_resource_host() {
    let base = derive_base_urls("https://erp.example.com/ignored/path", INVALID_BASE_URL_MESSAGE)
        .unwrap();

    let url = base.resource_url("/api/tasktracker/task/query/get/7").unwrap();

    assert_eq!(
        url.as_str(),
        "https://erp.example.com/api/tasktracker/task/query/get/7"
    );
}

/// **VALUE**: IP-literal hosts derive like any other host.
///
/// **WHY THIS MATTERS**: Local and staging instances are often addressed by
/// IP; the derived identity host must follow the same `id-` rule so the
/// failure, if any, is reported where the request is sent.
///
/// **BUG THIS CATCHES**: Re-parsing `http://id-127.0.0.1:8080` as a URL, which
/// rejects it (a trailing numeric label reads as IPv4) and turns a valid base
/// URL into `Invalid base URL`.
#[test]
fn given_ip_literal_host_when_derived_then_auth_base_gets_id_prefix() {
    // GIVEN: A base URL on an IPv4 address with a port and path
    let url = "http://127.0.0.1:8080/x";

    // WHEN: Deriving base URLs
    let base = derive_base_urls(url, INVALID_BASE_URL_MESSAGE).unwrap();

    // THEN: Both origins keep scheme and port
    assert_eq!(base.resource_origin(), "http://127.0.0.1:8080");
    assert_eq!(base.auth_origin(), "http://id-127.0.0.1:8080");
}

#[test]
fn given_token_response_when_extracting_then_accepts_only_non_empty_values() {
    assert_eq!(
        extract_access_token(&json!({"access_token": "abc"})),
        Some(String::from("abc"))
    );
    assert_eq!(
        extract_access_token(&json!({"access_token": 42})),
        Some(String::from("42"))
    );
    assert_eq!(extract_access_token(&json!({"access_token": ""})), None);
    assert_eq!(extract_access_token(&json!({"access_token": null})), None);
    assert_eq!(extract_access_token(&json!({"token_type": "Bearer"})), None);
    assert_eq!(extract_access_token(&json!(["access_token"])), None);
}

/// **VALUE**: Both credential parts are required before any request is made.
///
/// **BUG THIS CATCHES**: Sending a token request with an empty client secret.
#[test]
fn given_missing_or_empty_credentials_when_built_then_returns_missing_credentials() {
    let cases = [
        (None, Some("secret")),
        (Some("client"), None),
        (Some(""), Some("secret")),
        (Some("client"), Some("")),
        (None, None),
    ];

    for (id, secret) in cases {
        let result = Credentials::from_parts(id.map(String::from), secret.map(String::from));
        assert!(
            matches!(result, Err(AuthError::MissingCredentials { .. })),
            "id={id:?} secret={secret:?}"
        );
    }
}

#[test]
fn given_lookup_with_both_values_when_built_then_credentials_are_available() {
    let credentials = Credentials::from_lookup(|key| match key {
        "erp_client_id" => Some(String::from("agent")),
        "erp_client_secret" => Some(String::from("s3cret")),
        _ => None,
    })
    .unwrap();

    assert_eq!(credentials.client_id(), "agent");
    assert_eq!(credentials.client_secret().expose(), "s3cret");
    assert!(!format!("{credentials:?}").contains("s3cret"));
}
