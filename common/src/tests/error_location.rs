// Unit tests for ErrorLocation capture and formatting

use crate::ErrorLocation;

use std::panic::Location;

#[track_caller]
fn capture() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: `#[track_caller]` helpers record their caller's position.
///
/// **WHY THIS MATTERS**: Every error constructor in the workspace relies on
/// this; without it all diagnostics would point into the error modules.
///
/// **BUG THIS CATCHES**: Capturing `Location::caller()` somewhere that does
/// not propagate the caller (e.g. a plain helper).
#[test]
fn given_track_caller_helper_when_capturing_then_location_is_call_site() {
    // GIVEN: The line of the call below
    let expected_line = line!() + 3;

    // WHEN: Capturing through a #[track_caller] helper
    let location = capture();

    // THEN: File and line are the call site's
    assert!(location.file.ends_with("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/auth/mod.rs",
        line: 42,
        column: 9,
    };

    assert_eq!(location.to_string(), "[src/auth/mod.rs:42:9]");
}
