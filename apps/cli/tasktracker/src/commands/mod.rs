//! Subcommand handlers.
//!
//! Each handler validates its input first, then resolves the base URLs,
//! authenticates and issues its request. The returned JSON is what gets
//! printed on success.

pub mod change_labels;
pub mod comment;
pub mod comments;
pub mod create_task;
pub mod get;

use crate::cli::{Command, EntityArgs};
use crate::output::write_json;

use tasktracker_core::api::TaskTrackerClient;
use tasktracker_core::auth::{
    BaseUrls, INVALID_BASE_URL_MESSAGE, INVALID_TASKTRACKER_URL_MESSAGE, derive_base_urls,
};
use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::{CoreError, ValidationError};
use tasktracker_core::input::{EntityKind, EntityRef, parse_entity_url, parse_id};
use tasktracker_core::report::{ErrorReporter, FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE};

use std::io::Write;

use log::{debug, info};
use serde_json::Value;

/// Run one command and return its JSON result.
pub async fn execute(
    command: &Command,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    info!("Running {}", command.name());

    match command {
        Command::CreateTask(args) => create_task::run(args, settings, dispatcher).await,
        Command::Get(args) => get::run(args, settings, dispatcher).await,
        Command::Comments(args) => comments::run(args, settings, dispatcher).await,
        Command::Comment(args) => comment::run(args, settings, dispatcher).await,
        Command::ChangeLabels(args) => change_labels::run(args, settings, dispatcher).await,
    }
}

/// Run one command, print the result to `out` or a diagnostic to `reporter`,
/// and return the exit code.
pub async fn execute_with<O, E>(
    command: &Command,
    settings: &Settings,
    dispatcher: &Dispatcher,
    out: &mut O,
    reporter: &mut ErrorReporter<E>,
) -> u8
where
    O: Write,
    E: Write,
{
    let value = match execute(command, settings, dispatcher).await {
        Ok(value) => value,
        Err(e) => {
            debug!("{} failed: {e}", command.name());
            return reporter.report(&e);
        }
    };

    match write_json(out, &value) {
        Ok(()) => SUCCESS_EXIT_CODE,
        Err(e) => {
            reporter.execution_error(&e);
            FAILURE_EXIT_CODE
        }
    }
}

/// Entity and base URLs for `--url | --task-id | --epic-id`.
///
/// A URL supplies both; an ID needs the configured base URL.
pub(crate) fn resolve_target(
    args: &EntityArgs,
    settings: &Settings,
) -> Result<(EntityRef, BaseUrls), CoreError> {
    if let Some(url) = &args.url {
        let base = derive_base_urls(url, INVALID_TASKTRACKER_URL_MESSAGE)?;
        let entity = parse_entity_url(url)?;
        return Ok((entity, base));
    }

    let entity = match (&args.task_id, &args.epic_id) {
        (Some(raw), _) => EntityRef::task(parse_id(raw, EntityKind::Task.id_label())?),
        (None, Some(raw)) => EntityRef::epic(parse_id(raw, EntityKind::Epic.id_label())?),
        (None, None) => {
            return Err(ValidationError::invalid_input(
                "One of --url, --task-id or --epic-id is required",
            )
            .into());
        }
    };

    Ok((entity, resolve_base(settings)?))
}

/// Base URLs from `--erp-base-url` or the environment.
pub(crate) fn resolve_base(settings: &Settings) -> Result<BaseUrls, CoreError> {
    let base_url = settings.require_base_url()?;
    Ok(derive_base_urls(base_url, INVALID_BASE_URL_MESSAGE)?)
}

/// Authenticate with the configured credentials.
pub(crate) async fn connect<'a>(
    dispatcher: &'a Dispatcher,
    base: BaseUrls,
    settings: &Settings,
) -> Result<TaskTrackerClient<'a>, CoreError> {
    let credentials = settings.credentials()?;
    TaskTrackerClient::connect(dispatcher, base, &credentials).await
}
