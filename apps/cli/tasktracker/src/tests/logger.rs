// Unit tests for logger setup
// Only initialize() installs the global logger; the other tests build the
// dispatch tree without applying it

use crate::error::CliError;
use crate::logger::{build_dispatch, initialize, level_for_verbosity};

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't fail.
///
/// **WHY THIS MATTERS**: Library callers and tests may both reach
/// initialization; a second call must not abort the command.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable log file location
    let temp_dir = tempfile::tempdir().unwrap();
    let log_file = temp_dir.path().join("tasktracker.log");

    // WHEN: Calling initialize twice
    let result1 = initialize(LevelFilter::Info, Some(&log_file));
    let result2 = initialize(LevelFilter::Info, Some(&log_file));

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: An unwritable `--log-file` is reported, not a panic.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` is unwrapped.
#[test]
fn given_unwritable_log_file_when_building_then_returns_logger_error() {
    // GIVEN: A path below a regular file
    let invalid = std::path::PathBuf::from("/dev/null/tasktracker.log");

    // WHEN: Building the dispatch
    let result = build_dispatch(LevelFilter::Warn, Some(&invalid));

    // THEN: Logger error naming the path
    match result {
        Err(CliError::Logger { message, .. }) => {
            assert!(message.contains("/dev/null/tasktracker.log"));
        }
        Err(other) => panic!("expected logger error, got {other:?}"),
        Ok(_) => panic!("expected logger error"),
    }
}

#[test]
fn given_no_log_file_when_building_then_succeeds() {
    assert!(build_dispatch(LevelFilter::Trace, None).is_ok());
}

#[test]
fn given_verbosity_counts_when_mapped_then_levels_increase() {
    assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
    assert_eq!(level_for_verbosity(1), LevelFilter::Info);
    assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
    assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
    assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
}
