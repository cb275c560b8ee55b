// Unit tests for HttpStatusCode classification

use crate::HttpStatusCode;

/// **VALUE**: Only 2xx responses are decoded as results.
///
/// **BUG THIS CATCHES**: Off-by-one range bounds (e.g. treating 300 or 199 as
/// success), which would print a redirect page as JSON output.
#[test]
fn given_status_codes_when_classified_then_only_2xx_is_success() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(199).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(404).is_success());
}

#[test]
fn given_status_code_when_displayed_then_prints_bare_number() {
    let status = HttpStatusCode::from(404);

    assert_eq!(status.to_string(), "404");
    assert_eq!(status.as_u16(), 404);
}
