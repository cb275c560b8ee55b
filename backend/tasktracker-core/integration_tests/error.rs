use tasktracker_core::auth::{INVALID_BASE_URL_MESSAGE, derive_base_urls};
use tasktracker_core::config::{Settings, SettingsOverrides};
use tasktracker_core::error::{CoreError, ErrorCategory, ValidationError};
use tasktracker_core::input::{parse_id, resolve_comment_text};

use std::error::Error;

/// **VALUE**: Validation failures point at the caller, not the error module,
/// while the user-facing text carries only the message and the URL.
///
/// **WHY THIS MATTERS**: `Execution error:` lines are what users see; the
/// location goes to the debug log so maintainers can tell which check fired.
///
/// **BUG THIS CATCHES**: Dropping `#[track_caller]` from `derive_base_urls`,
/// which would make every location read `validation.rs`, or printing source
/// paths in diagnostics.
#[test]
fn given_invalid_base_url_when_formatted_then_shows_url_and_records_location() {
    // GIVEN: A URL without scheme
    let err = derive_base_urls("erp.example.com", INVALID_BASE_URL_MESSAGE).unwrap_err();

    // WHEN: Formatting the error as string
    let error_string = format!("{}", err);

    // THEN: Message and offending URL only; location is kept on the value
    assert_eq!(error_string, "Invalid URL Error: Invalid base URL: erp.example.com");
    let location = err.location().to_string();
    assert!(location.contains("error.rs"), "location: {location}");
}

#[test]
fn given_id_error_when_formatted_then_message_names_the_field() {
    let err = parse_id("abc", "Epic ID").unwrap_err();

    assert!(matches!(err, ValidationError::InvalidInput { .. }));
    assert!(err.to_string().contains("Epic ID must contain only digits"));
}

/// **VALUE**: I/O causes stay reachable through `source()`.
///
/// **BUG THIS CATCHES**: Removing `#[source]` from the file-read variants.
#[test]
fn given_unreadable_text_file_when_resolved_then_source_chain_is_preserved() {
    let dir = tempfile::tempdir().unwrap();

    // A directory cannot be read as a file
    let err = resolve_comment_text(None, Some(dir.path())).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Execution);
    let CoreError::Execution(inner) = &err else {
        panic!("expected execution error, got {err:?}");
    };
    assert!(inner.source().is_some());
}

#[test]
fn given_missing_base_url_when_required_then_message_tells_how_to_fix() {
    let settings = Settings::resolve(&SettingsOverrides::default(), |_| None);

    let err = CoreError::from(settings.require_base_url().unwrap_err());

    assert_eq!(err.category(), ErrorCategory::Config);
    assert!(err.to_string().contains("pass --erp-base-url or set erp_base_url in .env"));
}
