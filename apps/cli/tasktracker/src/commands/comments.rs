use crate::cli::EntityArgs;
use crate::commands::{connect, resolve_target};

use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;

use serde_json::Value;

/// The comment list exactly as the API returns it.
pub async fn run(
    args: &EntityArgs,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    let (entity, base) = resolve_target(args, settings)?;
    let client = connect(dispatcher, base, settings).await?;
    client.list_comments(entity).await
}
