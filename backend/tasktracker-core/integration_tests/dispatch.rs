use crate::helpers::{closed_port, dispatcher_for, resource_origin, serve_raw_once};

use tasktracker_core::dispatch::{Dispatcher, UNREADABLE_BODY};
use tasktracker_core::error::DispatchError;

use common::RedactedSecret;

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> RedactedSecret {
    RedactedSecret::new("tok-123")
}

fn url_for(server: &MockServer, api_path: &str) -> Url {
    Url::parse(&format!("{}{api_path}", resource_origin(server))).unwrap()
}

/// **VALUE**: Authorized requests carry the bearer token and ask for JSON.
///
/// **BUG THIS CATCHES**: Forgetting `Accept: application/json`, which makes
/// some endpoints answer with an HTML error page.
#[tokio::test]
async fn given_authorized_get_when_dispatched_then_sends_bearer_and_accept_headers() {
    // GIVEN: An endpoint requiring both headers
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/task/query/get/1"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Title": "One"})))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Dispatching a GET
    let value = dispatcher_for(&server)
        .get_json(&url_for(&server, "/api/tasktracker/task/query/get/1"), &token())
        .await
        .unwrap();

    // THEN: The decoded body is returned
    assert_eq!(value, json!({"Title": "One"}));
}

/// **VALUE**: Non-ASCII text is sent as raw UTF-8 JSON.
///
/// **WHY THIS MATTERS**: Comments are often written in Cyrillic; the server
/// stores what it receives.
#[tokio::test]
async fn given_non_ascii_payload_when_posted_then_body_is_utf8_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasktracker/taskComment/command/Create"))
        .and(header("content-type", "application/json"))
        .and(body_string_contains("Проверено"))
        .and(body_json(json!({"text": "Проверено"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let value = dispatcher_for(&server)
        .post_json(
            &url_for(&server, "/api/tasktracker/taskComment/command/Create"),
            &token(),
            &json!({"text": "Проверено"}),
        )
        .await
        .unwrap();

    assert_eq!(value, json!({"id": 1}));
}

#[tokio::test]
async fn given_empty_success_body_when_patched_then_returns_status_object() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasktracker/Task/command/ChangeLabels/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let value = dispatcher_for(&server)
        .patch_json(
            &url_for(&server, "/api/tasktracker/Task/command/ChangeLabels/5"),
            &token(),
            &json!({"taskId": 5, "labelIds": []}),
        )
        .await
        .unwrap();

    assert_eq!(value, json!({"status": 204}));
}

/// **VALUE**: Error responses keep URL, status, reason and body.
///
/// **BUG THIS CATCHES**: Calling `error_for_status()` first, which discards
/// the response body before it can be reported.
#[tokio::test]
async fn given_not_found_when_dispatched_then_returns_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/task/query/get/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("task not found"))
        .mount(&server)
        .await;

    let url = url_for(&server, "/api/tasktracker/task/query/get/404");
    let err = dispatcher_for(&server)
        .get_json(&url, &token())
        .await
        .unwrap_err();

    match err {
        DispatchError::Http {
            url: failed_url,
            status,
            reason,
            body,
            ..
        } => {
            assert_eq!(failed_url, url.as_str());
            assert_eq!(status.as_u16(), 404);
            assert_eq!(reason, "Not Found");
            assert_eq!(body, "task not found");
            assert_ne!(body, UNREADABLE_BODY);
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_html_success_body_when_dispatched_then_returns_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/TaskComment"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = dispatcher_for(&server)
        .get_json(&url_for(&server, "/api/tasktracker/TaskComment"), &token())
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Json { .. }));
}

/// **VALUE**: Refused connections are network errors, not HTTP errors.
///
/// **BUG THIS CATCHES**: Reporting a down server with the HTTP line format
/// and a made-up status.
#[tokio::test]
async fn given_nothing_listening_when_dispatched_then_returns_network_error() {
    let port = closed_port();
    let url = Url::parse(&format!("http://127.0.0.1:{port}/api/tasktracker/task/query/get/1")).unwrap();
    let dispatcher = Dispatcher::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();

    let err = dispatcher.get_json(&url, &token()).await.unwrap_err();

    match err {
        DispatchError::Network {
            url: failed_url,
            reason,
            ..
        } => {
            assert_eq!(failed_url, url.as_str());
            assert!(!reason.is_empty());
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_form_fields_when_posted_then_no_authorization_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oidc/connect/token"))
        .and(body_string_contains("a=1&b=two+words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let value = dispatcher_for(&server)
        .post_form(
            &url_for(&server, "/oidc/connect/token"),
            &[("a", "1"), ("b", "two words")],
        )
        .await
        .unwrap();

    assert_eq!(value, json!({"ok": true}));
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

/// **VALUE**: HTTP failures report the reason phrase the server actually sent.
///
/// **WHY THIS MATTERS**: Gateways put the useful hint in a custom phrase
/// (`429 Quota Exhausted For Project`); replacing it with the canonical
/// phrase hides it.
///
/// **BUG THIS CATCHES**: Using `StatusCode::canonical_reason()` unconditionally.
#[tokio::test]
async fn given_custom_reason_phrase_when_request_fails_then_reason_is_kept() {
    // GIVEN: A server answering with a non-canonical status line
    let port = serve_raw_once(
        "HTTP/1.1 429 Quota Exhausted For Project\r\n\
         Content-Type: application/json\r\n\
         Content-Length: 15\r\n\
         Connection: close\r\n\
         \r\n\
         {\"retry\":false}",
    );
    let url = Url::parse(&format!("http://127.0.0.1:{port}/api/tasktracker/task/query/get/1")).unwrap();
    let dispatcher = Dispatcher::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();

    // WHEN: Dispatching
    let err = dispatcher.get_json(&url, &token()).await.unwrap_err();

    // THEN: The phrase and body come through unchanged
    match err {
        DispatchError::Http {
            status,
            reason,
            body,
            ..
        } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(reason, "Quota Exhausted For Project");
            assert_eq!(body, "{\"retry\":false}");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_canonical_reason_phrase_when_request_fails_then_canonical_phrase_is_used() {
    let port = serve_raw_once(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );
    let url = Url::parse(&format!("http://127.0.0.1:{port}/x")).unwrap();
    let dispatcher = Dispatcher::builder().no_proxy().build().unwrap();

    let err = dispatcher.get_json(&url, &token()).await.unwrap_err();

    match err {
        DispatchError::Http { reason, body, .. } => {
            assert_eq!(reason, "Service Unavailable");
            assert_eq!(body, "");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}
