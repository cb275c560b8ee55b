// Unit tests for result printing

use crate::output::write_json;

use serde_json::json;

/// **VALUE**: Output is two-space indented and keeps non-ASCII text readable.
///
/// **BUG THIS CATCHES**: Escaping Cyrillic as `\u0417...`, or reordering keys
/// alphabetically (missing `preserve_order`).
#[test]
fn given_result_with_unicode_when_written_then_pretty_prints_in_insertion_order() {
    // GIVEN: A result whose keys are not alphabetical
    let value = json!({"TaskId": "555", "Title": "Задача", "Description": null});
    let mut out = Vec::new();

    // WHEN: Writing
    write_json(&mut out, &value).unwrap();

    // THEN: Exact pretty output with trailing newline
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"TaskId\": \"555\",\n  \"Title\": \"Задача\",\n  \"Description\": null\n}\n"
    );
}
