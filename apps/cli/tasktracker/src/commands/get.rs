use crate::cli::EntityArgs;
use crate::commands::{connect, resolve_target};

use tasktracker_core::api::first_present;
use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;
use tasktracker_core::input::EntityKind;

use serde_json::{Value, json};

pub async fn run(
    args: &EntityArgs,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    let (entity, base) = resolve_target(args, settings)?;
    let client = connect(dispatcher, base, settings).await?;
    let data = client.get_entity(entity).await?;

    Ok(match entity.kind {
        EntityKind::Task => task_summary(entity.id, &data),
        EntityKind::Epic => epic_summary(entity.id, &data),
    })
}

/// `{TaskId, Title, Description}`; the ID is echoed back as a string.
pub fn task_summary(task_id: u64, data: &Value) -> Value {
    json!({
        "TaskId": task_id.to_string(),
        "Title": pick(data, &["Title", "title"]),
        "Description": pick(data, &["Description", "description"]),
    })
}

pub fn epic_summary(epic_id: u64, data: &Value) -> Value {
    json!({
        "ID": epic_id,
        "Title": pick(data, &["Title", "title"]),
        "Description": pick(data, &["Description", "description"]),
        "ProjectId": pick(data, &["ProjectId", "projectId"]),
    })
}

fn pick(data: &Value, keys: &[&str]) -> Value {
    first_present(data, keys).cloned().unwrap_or(Value::Null)
}
