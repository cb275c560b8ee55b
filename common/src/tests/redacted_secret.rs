// Unit tests for RedactedSecret
// Secrets must never leak through formatting or serialization

use crate::RedactedSecret;

/// **VALUE**: Guarantees the client secret and bearer token never appear in logs.
///
/// **WHY THIS MATTERS**: Errors and debug logs format whole structs with `{:?}`.
/// A derived Debug would print the raw credential.
///
/// **BUG THIS CATCHES**: Replacing the manual Debug/Display impls with derives.
#[test]
fn given_secret_when_formatted_then_value_is_hidden() {
    // GIVEN: A secret value
    let secret = RedactedSecret::new("super-secret-value");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    // THEN: Neither output contains the value
    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_secret_when_exposed_then_returns_original_value() {
    let secret = RedactedSecret::from(String::from("abc"));

    assert_eq!(secret.expose(), "abc");
    assert_eq!(secret.len(), 3);
    assert!(!secret.is_empty());
}

/// **VALUE**: Serializing a struct containing a secret must fail loudly.
///
/// **BUG THIS CATCHES**: Someone deriving Serialize on a type holding credentials
/// and printing it as JSON output.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    let secret = RedactedSecret::new("token");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err(), "Secrets must refuse serialization");
}
