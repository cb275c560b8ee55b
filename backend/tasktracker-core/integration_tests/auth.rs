use crate::helpers::{TEST_TOKEN, auth_host_header, dispatcher_for, mount_token, resource_origin};

use tasktracker_core::auth::{
    Credentials, INVALID_BASE_URL_MESSAGE, TOKEN_ENDPOINT_PATH, derive_base_urls, get_token,
};
use tasktracker_core::error::{AuthError, DispatchError};

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::from_parts(Some(String::from("agent")), Some(String::from("s3cret&=")))
        .unwrap()
}

/// **VALUE**: The token request is a form POST to the derived identity host.
///
/// **WHY THIS MATTERS**: The identity provider only accepts
/// `application/x-www-form-urlencoded` client-credential grants on the `id-` host.
///
/// **BUG THIS CATCHES**: Sending JSON, hitting the resource host, or failing
/// to percent-encode secrets containing `&` or `=`.
#[tokio::test]
async fn given_valid_credentials_when_requesting_token_then_posts_form_to_id_host() {
    // GIVEN: A token endpoint that checks host, content type and form fields
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_ENDPOINT_PATH))
        .and(header("host", auth_host_header(&server).as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=agent"))
        .and(body_string_contains("client_secret=s3cret%26%3D"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": TEST_TOKEN})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_BASE_URL_MESSAGE).unwrap();

    // WHEN: Requesting a token
    let token = get_token(&dispatcher, &base.auth_base, &credentials()).await.unwrap();

    // THEN: The access token is returned
    assert_eq!(token.expose(), TEST_TOKEN);
}

#[tokio::test]
async fn given_response_without_access_token_when_requesting_then_returns_token_missing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "none"})))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_BASE_URL_MESSAGE).unwrap();

    let result = get_token(&dispatcher, &base.auth_base, &credentials()).await;

    assert!(matches!(result, Err(AuthError::TokenMissing { .. })));
}

/// **VALUE**: Rejected credentials surface as an HTTP error with the body.
///
/// **BUG THIS CATCHES**: Mapping a 401 to "missing token", which hides the
/// identity provider's `invalid_client` explanation.
#[tokio::test]
async fn given_rejected_credentials_when_requesting_then_returns_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_BASE_URL_MESSAGE).unwrap();

    let result = get_token(&dispatcher, &base.auth_base, &credentials()).await;

    match result {
        Err(AuthError::Dispatch(DispatchError::Http {
            url, status, body, ..
        })) => {
            assert!(url.ends_with(TOKEN_ENDPOINT_PATH));
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, r#"{"error":"invalid_client"}"#);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_token_mock_when_requested_twice_then_each_call_hits_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": 7})))
        .expect(2)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_BASE_URL_MESSAGE).unwrap();

    // No caching: every invocation fetches a fresh token
    for _ in 0..2 {
        let token = get_token(&dispatcher, &base.auth_base, &credentials()).await.unwrap();
        assert_eq!(token.expose(), "7");
    }
}

#[tokio::test]
async fn given_helper_token_mock_when_requested_then_returns_fixture_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_BASE_URL_MESSAGE).unwrap();

    let token = get_token(&dispatcher, &base.auth_base, &credentials()).await.unwrap();

    assert_eq!(token.expose(), TEST_TOKEN);
}

/// **VALUE**: An identity host that cannot be addressed fails as a network
/// error, matching how an unresolvable host is reported.
///
/// **BUG THIS CATCHES**: Rejecting IP-literal base URLs up front as invalid
/// input, or reporting the unaddressable `id-` host as a generic execution
/// error.
#[tokio::test]
async fn given_ip_literal_base_url_when_requesting_token_then_fails_as_network_error() {
    // GIVEN: A base URL on an IPv4 address
    let base = derive_base_urls("http://127.0.0.1:8080/x", INVALID_BASE_URL_MESSAGE).unwrap();
    let dispatcher = tasktracker_core::dispatch::Dispatcher::builder()
        .no_proxy()
        .build()
        .unwrap();

    // WHEN: Requesting a token from the derived identity host
    let result = get_token(&dispatcher, &base.auth_base, &credentials()).await;

    // THEN: Network category, naming the token URL
    match result {
        Err(AuthError::Dispatch(DispatchError::Network { url, reason, .. })) => {
            assert_eq!(url, "http://id-127.0.0.1:8080/oidc/connect/token");
            assert!(reason.contains("identity host"), "reason: {reason}");
        }
        other => panic!("expected network error, got {other:?}"),
    }
}
