//! `.env` loading from the working directory.
//!
//! Values from the file never replace variables that are already present in
//! the process environment. A missing file is not an error.

use crate::error::ConfigError;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const DOTENV_FILE_NAME: &str = ".env";

/// Result of attempting to load a `.env` file.
#[derive(Debug, Default)]
pub struct EnvLoadResult {
    /// Path to the loaded file, if one was found.
    pub path: Option<PathBuf>,
    /// Keys set from the file.
    pub applied: Vec<String>,
    /// Keys present in the file but already set in the environment.
    pub preserved: Vec<String>,
    /// Non-blank, non-comment lines without `=`.
    pub skipped_lines: usize,
}

impl EnvLoadResult {
    pub fn loaded(&self) -> bool {
        self.path.is_some()
    }
}

/// Load `.env` from the current working directory.
pub fn load_dotenv() -> Result<EnvLoadResult, ConfigError> {
    let cwd = env::current_dir().map_err(|e| {
        ConfigError::env_file(DOTENV_FILE_NAME, format!("cannot resolve working directory: {e}"))
    })?;

    load_dotenv_from(&cwd.join(DOTENV_FILE_NAME))
}

/// Load the given dotfile into the process environment.
///
/// Must run before any other thread is started: it mutates the process
/// environment.
pub fn load_dotenv_from(path: &Path) -> Result<EnvLoadResult, ConfigError> {
    let Some(entries) = read_dotenv(path)? else {
        debug!("No .env file at {:?}", path);
        return Ok(EnvLoadResult::default());
    };

    let mut result = EnvLoadResult {
        path: Some(path.to_path_buf()),
        skipped_lines: entries.skipped_lines,
        ..EnvLoadResult::default()
    };

    for (key, value) in entries.values {
        if env::var_os(&key).is_some() {
            result.preserved.push(key);
            continue;
        }

        // SAFETY: dotfile loading happens at startup, before the async
        // runtime or any other thread exists.
        unsafe {
            env::set_var(&key, value);
        }
        result.applied.push(key);
    }

    info!(
        "Loaded .env from {:?}: {} applied, {} already set",
        path,
        result.applied.len(),
        result.preserved.len()
    );

    Ok(result)
}

/// Parsed `.env` content, in file order.
#[derive(Debug, Default)]
pub struct DotenvEntries {
    pub values: Vec<(String, String)>,
    pub skipped_lines: usize,
}

/// Parse a dotfile without touching the environment.
///
/// Returns `Ok(None)` when the file does not exist. Every line is read on its
/// own and values are taken literally: no variable expansion, escapes, inline
/// comments or multi-line quoting. Lines without `=` are skipped with a
/// warning.
pub fn read_dotenv(path: &Path) -> Result<Option<DotenvEntries>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::env_file(path, e.to_string()))?;

    let mut entries = DotenvEntries::default();

    for (index, line) in content.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        match parse_plain_line(entry) {
            Some(pair) => entries.values.push(pair),
            None => {
                warn!("Skipping malformed .env line {}", index + 1);
                entries.skipped_lines += 1;
            }
        }
    }

    Ok(Some(entries))
}

/// Split a raw `KEY=VALUE` line on the first `=`.
///
/// Key and value are trimmed and one matching pair of surrounding quotes is
/// removed from the value. Blank lines, comments and lines without `=` yield
/// `None`.
pub fn parse_plain_line(line: &str) -> Option<(String, String)> {
    let entry = line.trim();
    if entry.is_empty() || entry.starts_with('#') {
        return None;
    }

    let (key, value) = entry.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), strip_quotes(value.trim()).to_string()))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
