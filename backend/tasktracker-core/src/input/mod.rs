//! Validation of user-supplied identifiers, URLs and comment text.

use crate::error::{CoreError, ExecutionError, ValidationError};

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/tasks/([0-9]+)").expect("task URL pattern is valid"));

static EPIC_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/epics/([0-9]+)").expect("epic URL pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Epic,
}

impl EntityKind {
    /// Human label used in validation messages.
    pub fn id_label(&self) -> &'static str {
        match self {
            EntityKind::Task => "Task ID",
            EntityKind::Epic => "Epic ID",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Task => write!(f, "task"),
            EntityKind::Epic => write!(f, "epic"),
        }
    }
}

/// A task or epic addressed by numeric ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityRef {
    pub fn task(id: u64) -> Self {
        Self {
            kind: EntityKind::Task,
            id,
        }
    }

    pub fn epic(id: u64) -> Self {
        Self {
            kind: EntityKind::Epic,
            id,
        }
    }
}

/// Parse a required numeric ID; surrounding whitespace is ignored.
#[track_caller]
pub fn parse_id(raw: &str, label: &str) -> Result<u64, ValidationError> {
    let value = raw.trim();
    if !is_digits(value) {
        return Err(ValidationError::invalid_input(format!(
            "{label} must contain only digits"
        )));
    }

    value
        .parse::<u64>()
        .map_err(|_| ValidationError::invalid_input(format!("{label} is out of range")))
}

/// Parse an optional numeric ID; absent or blank input yields `None`.
#[track_caller]
pub fn parse_optional_id(raw: Option<&str>, label: &str) -> Result<Option<u64>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(value, label).map(Some),
    }
}

/// Parse a comma-separated ID list such as `6,73`.
///
/// Empty input yields an empty list and empty segments are skipped, so
/// `"6,,73"` is `[6, 73]`.
#[track_caller]
pub fn parse_id_list(raw: &str, arg_name: &str) -> Result<Vec<u64>, ValidationError> {
    let mut values = Vec::new();

    for chunk in raw.split(',').map(str::trim) {
        if chunk.is_empty() {
            continue;
        }
        let value = is_digits(chunk)
            .then(|| chunk.parse::<u64>().ok())
            .flatten()
            .ok_or_else(|| {
                ValidationError::invalid_input(format!(
                    "{arg_name} must contain integers separated by commas"
                ))
            })?;
        values.push(value);
    }

    Ok(values)
}

/// Extract the task or epic from a TaskTracker web URL.
///
/// `/tasks/<id>` is checked before `/epics/<id>`; the first match wins.
#[track_caller]
pub fn parse_entity_url(url: &str) -> Result<EntityRef, ValidationError> {
    let captured = |pattern: &Regex| {
        pattern
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|id| id.as_str().to_string())
    };

    let (kind, raw_id) = if let Some(id) = captured(&TASK_URL_PATTERN) {
        (EntityKind::Task, id)
    } else if let Some(id) = captured(&EPIC_URL_PATTERN) {
        (EntityKind::Epic, id)
    } else {
        return Err(ValidationError::invalid_input(
            "Cannot extract TaskId or EpicId from URL",
        ));
    };

    let id = parse_id(&raw_id, kind.id_label())?;
    debug!("Extracted {kind} {id} from URL");

    Ok(EntityRef { kind, id })
}

/// Resolve comment text from `--text` or `--text-file`.
///
/// Exactly one source must be given and the trimmed text must not be empty.
/// File read failures are execution errors, not validation errors.
#[track_caller]
pub fn resolve_comment_text(
    text: Option<&str>,
    text_file: Option<&Path>,
) -> Result<String, CoreError> {
    let content = match (text, text_file) {
        (Some(_), Some(_)) => {
            return Err(ValidationError::invalid_input(
                "Use either --text or --text-file, not both",
            )
            .into());
        }
        (None, Some(path)) => {
            fs::read_to_string(path).map_err(|e| ExecutionError::from_read(path, e))?
        }
        (Some(text), None) => text.to_string(),
        (None, None) => String::new(),
    };

    let comment = content.trim();
    if comment.is_empty() {
        return Err(ValidationError::invalid_input("Comment text is empty").into());
    }

    Ok(comment.to_string())
}

/// Require a non-blank value, returning it trimmed.
#[track_caller]
pub fn require_non_empty(value: &str, field_name: &str) -> Result<String, ValidationError> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return Err(ValidationError::invalid_input(format!(
            "{field_name} is required and cannot be empty"
        )));
    }
    Ok(cleaned.to_string())
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
