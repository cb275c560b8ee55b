// Tests of the compiled binary: argument errors, exit codes, .env handling
// and diagnostic lines. Nothing here reaches a real TaskTracker host.

use crate::helpers::closed_port;

use tasktracker_core::config::{BASE_URL_ENV_KEYS, PROJECT_ID_ENV_KEYS};

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const PROXY_ENV_KEYS: [&str; 6] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// The binary run from `dir` with no TaskTracker settings inherited.
fn tasktracker(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tasktracker").unwrap();
    cmd.current_dir(dir)
        .env_remove("erp_client_id")
        .env_remove("erp_client_secret");
    for key in BASE_URL_ENV_KEYS
        .iter()
        .chain(PROJECT_ID_ENV_KEYS.iter())
        .chain(PROXY_ENV_KEYS.iter())
    {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn given_help_flag_when_run_then_lists_subcommands_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path())
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("create-task"))
        .stdout(predicate::str::contains("change-labels"));
}

#[test]
fn given_version_flag_when_run_then_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path())
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// **VALUE**: Argument errors use the same exit code as every other failure.
///
/// **BUG THIS CATCHES**: Letting clap exit with its default code 2.
#[test]
fn given_missing_subcommand_or_conflicting_flags_when_run_then_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path()).assert().code(1);
    tasktracker(dir.path())
        .args(["get", "--task-id", "1", "--epic-id", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

/// **VALUE**: Conflicting comment sources fail with one diagnostic line.
///
/// **WHY THIS MATTERS**: Scripts check stdout for JSON; a failure must leave
/// it empty and explain itself on stderr.
#[test]
fn given_text_and_text_file_when_comment_run_then_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("comment.md"), "from file").unwrap();

    tasktracker(dir.path())
        .args([
            "comment",
            "--task-id",
            "555",
            "--text",
            "inline",
            "--text-file",
            "comment.md",
            "--erp-base-url",
            "https://erp.example.com",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with(
            "Execution error: Validation Error: Use either --text or --text-file, not both",
        ));
}

#[test]
fn given_no_base_url_when_get_by_id_run_then_reports_missing_base_url() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path())
        .env("erp_client_id", "agent")
        .env("erp_client_secret", "s3cret")
        .args(["get", "--task-id", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Base URL is required: pass --erp-base-url or set erp_base_url in .env",
        ));
}

#[test]
fn given_no_credentials_when_run_then_reports_missing_env_vars() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path())
        .args(["comments", "--url", "https://erp.example.com/tasktracker/projects/1/tasks/5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing env vars: erp_client_id and/or erp_client_secret",
        ));
}

#[test]
fn given_bad_label_list_when_change_labels_run_then_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();

    tasktracker(dir.path())
        .args(["change-labels", "--task-id", "5", "--label-ids", "6,x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "label-ids must contain integers separated by commas",
        ));
}

/// **VALUE**: `.env` supplies settings but never overrides the environment.
///
/// **WHY THIS MATTERS**: A stale `.env` in a working directory must not
/// redirect requests that the caller pointed elsewhere.
///
/// **BUG THIS CATCHES**: Overriding dotfile loading. Here the dotfile's base
/// URL is invalid, so a validation error would mean it won over the
/// environment; the expected result is a network failure on the real target.
#[test]
fn given_dotenv_and_env_base_url_when_run_then_env_wins_and_network_error_is_reported() {
    // GIVEN: Credentials from .env, base URL from both sources
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".env"),
        "# local settings\n\
         erp_client_id=agent\n\
         erp_client_secret=\"s3cret\"\n\
         erp_base_url=not-a-url\n",
    )
    .unwrap();
    let base_url = format!("http://localhost:{}", closed_port());

    // WHEN/THEN: The token request fails at the transport level
    tasktracker(dir.path())
        .env("erp_base_url", &base_url)
        .args(["get", "--task-id", "5", "--timeout", "5"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("API network error: reason="));
}

#[test]
fn given_hyphenated_dotenv_key_when_run_then_base_url_is_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "erp-base-url = 'mailto:nobody'\n").unwrap();

    // The hyphenated key is picked up; its value fails URL validation
    tasktracker(dir.path())
        .args(["change-labels", "--task-id", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid base URL: mailto:nobody"));
}
