// Unit tests for settings resolution

use crate::config::{Settings, SettingsOverrides};
use crate::error::{AuthError, ConfigError};

use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// **VALUE**: A CLI base URL beats every environment key.
///
/// **WHY THIS MATTERS**: Users override a `.env` default for one call without
/// editing the file.
///
/// **BUG THIS CATCHES**: Environment values shadowing explicit flags.
#[test]
fn given_cli_and_env_base_url_when_resolved_then_cli_wins() {
    // GIVEN: Both sources set
    let overrides = SettingsOverrides {
        base_url: Some(String::from("https://cli.example.com")),
        ..SettingsOverrides::default()
    };
    let lookup = lookup_from(&[("erp_base_url", "https://env.example.com")]);

    // WHEN: Resolving
    let settings = Settings::resolve(&overrides, lookup);

    // THEN: The flag value is used
    assert_eq!(settings.require_base_url().unwrap(), "https://cli.example.com");
}

#[test]
fn given_several_env_keys_when_resolved_then_first_non_empty_wins() {
    let lookup = lookup_from(&[
        ("erp_base_url", "  "),
        ("ERP_BASE_URL", "https://upper.example.com"),
        ("erp-base-url", "https://hyphen.example.com"),
    ]);

    let settings = Settings::resolve(&SettingsOverrides::default(), lookup);

    assert_eq!(settings.base_url(), Some("https://upper.example.com"));
}

#[test]
fn given_no_base_url_when_required_then_returns_missing_base_url() {
    let settings = Settings::resolve(&SettingsOverrides::default(), lookup_from(&[]));

    assert!(settings.base_url().is_none());
    assert!(matches!(
        settings.require_base_url(),
        Err(ConfigError::MissingBaseUrl { .. })
    ));
}

/// **VALUE**: Project IDs from the environment must be digits.
///
/// **BUG THIS CATCHES**: Sending `"projectId": 0` or a string when the
/// dotfile holds a typo.
#[test]
fn given_non_numeric_project_id_env_when_required_then_returns_invalid_value() {
    let lookup = lookup_from(&[("project-id", "12x")]);

    let settings = Settings::resolve(&SettingsOverrides::default(), lookup);

    match settings.require_project_id() {
        Err(ConfigError::InvalidValue { key, reason, .. }) => {
            assert_eq!(key, "project-id");
            assert_eq!(reason, "in .env must be an integer");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn given_project_id_sources_when_required_then_cli_then_env_then_error() {
    let env = [("erp_tasktracker_project_id", "17"), ("projectId", "99")];

    let from_cli = Settings::resolve(
        &SettingsOverrides {
            project_id: Some(3),
            ..SettingsOverrides::default()
        },
        lookup_from(&env),
    );
    let from_env = Settings::resolve(&SettingsOverrides::default(), lookup_from(&env));
    let missing = Settings::resolve(&SettingsOverrides::default(), lookup_from(&[]));

    assert_eq!(from_cli.require_project_id().unwrap(), 3);
    assert_eq!(from_env.require_project_id().unwrap(), 17);
    assert!(matches!(
        missing.require_project_id(),
        Err(ConfigError::MissingProjectId { .. })
    ));
}

#[test]
fn given_credentials_in_env_when_resolved_then_secret_is_not_debug_printed() {
    let lookup = lookup_from(&[("erp_client_id", "agent"), ("erp_client_secret", "hunter2")]);

    let settings = Settings::resolve(&SettingsOverrides::default(), lookup);

    assert_eq!(settings.credentials().unwrap().client_id(), "agent");
    assert!(!format!("{settings:?}").contains("hunter2"));
}

#[test]
fn given_missing_secret_when_credentials_requested_then_returns_missing_credentials() {
    let settings = Settings::resolve(
        &SettingsOverrides::default(),
        lookup_from(&[("erp_client_id", "agent")]),
    );

    assert!(matches!(
        settings.credentials(),
        Err(AuthError::MissingCredentials { .. })
    ));
}

#[test]
fn given_timeout_override_when_resolved_then_defaults_to_thirty_seconds_otherwise() {
    let custom = Settings::resolve(
        &SettingsOverrides {
            timeout_secs: Some(5),
            ..SettingsOverrides::default()
        },
        lookup_from(&[]),
    );
    let default = Settings::resolve(&SettingsOverrides::default(), lookup_from(&[]));

    assert_eq!(custom.timeout(), Duration::from_secs(5));
    assert_eq!(default.timeout(), Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS));
}
