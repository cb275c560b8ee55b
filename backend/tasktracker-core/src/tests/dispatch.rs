// Unit tests for response decoding and error classification
// Request/response behaviour against a live server is in integration_tests/dispatch.rs

use crate::dispatch::decode_body;
use crate::error::dispatch::error_chain;
use crate::error::{
    AuthError, ConfigError, CoreError, DispatchError, ErrorCategory, ValidationError,
};

use std::fmt;

use serde_json::json;
use url::Url;

fn url() -> Url {
    Url::parse("https://erp.example.com/api/tasktracker/task/command/create").unwrap()
}

/// **VALUE**: Empty success bodies still produce JSON output.
///
/// **BUG THIS CATCHES**: Failing with a JSON error on `204 No Content` from
/// the labels endpoint.
#[test]
fn given_empty_or_blank_body_when_decoded_then_returns_status_object() {
    assert_eq!(decode_body(&url(), 204, "").unwrap(), json!({"status": 204}));
    assert_eq!(decode_body(&url(), 200, " \r\n").unwrap(), json!({"status": 200}));
}

#[test]
fn given_json_body_when_decoded_then_preserves_key_order_and_unicode() {
    let value = decode_body(&url(), 200, r#"{"b":1,"a":"Задача"}"#).unwrap();

    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":"Задача"}"#);
}

#[test]
fn given_non_json_body_when_decoded_then_returns_json_error_with_url() {
    let err = decode_body(&url(), 200, "<html>").unwrap_err();

    match &err {
        DispatchError::Json { url, .. } => assert!(url.ends_with("/task/command/create")),
        other => panic!("expected Json error, got {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::Execution);
}

#[test]
fn given_each_error_kind_when_categorized_then_maps_to_reporter_category() {
    let cases: Vec<(CoreError, ErrorCategory)> = vec![
        (ValidationError::invalid_input("x").into(), ErrorCategory::Validation),
        (ConfigError::missing_base_url().into(), ErrorCategory::Config),
        (ConfigError::env_file(".env", "denied").into(), ErrorCategory::Execution),
        (AuthError::missing_credentials().into(), ErrorCategory::Config),
        (AuthError::token_missing().into(), ErrorCategory::Execution),
        (DispatchError::http("u", 500, "Internal Server Error", "").into(), ErrorCategory::Http),
        (
            AuthError::from(DispatchError::http("u", 401, "Unauthorized", "")).into(),
            ErrorCategory::Http,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.category(), expected, "{error}");
    }
}

/// **VALUE**: Errors record the line that raised them without showing it to users.
///
/// **WHY THIS MATTERS**: Diagnostics on stderr are read by people and scripts;
/// source paths belong in the debug log.
///
/// **BUG THIS CATCHES**: A missing `#[track_caller]` on a constructor (every
/// location points inside the error module), or `{location}` leaking back
/// into the `Display` text.
#[test]
fn given_error_constructor_when_displayed_then_location_is_recorded_but_not_shown() {
    let err = DispatchError::http("u", 404, "Not Found", "");

    let text = err.to_string();

    assert_eq!(text, "HTTP Error: url=u, status=404, reason=Not Found");
    assert!(
        err.location().to_string().contains("tests/dispatch.rs"),
        "location: {}",
        err.location()
    );
}

#[derive(Debug)]
struct Layer(&'static str, Option<Box<Layer>>);

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Layer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.1
            .as_deref()
            .map(|layer| layer as &(dyn std::error::Error + 'static))
    }
}

#[test]
fn given_nested_errors_when_chained_then_joins_distinct_messages() {
    let error = Layer(
        "error sending request",
        Some(Box::new(Layer(
            "client error (Connect)",
            Some(Box::new(Layer("Connection refused", None))),
        ))),
    );

    assert_eq!(
        error_chain(&error),
        "error sending request: client error (Connect): Connection refused"
    );
}
