use crate::cli::CreateTaskArgs;
use crate::commands::{connect, resolve_base};

use tasktracker_core::api::{CreateTaskPayload, NewTask, first_present, first_present_or};
use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;
use tasktracker_core::input::{parse_id_list, require_non_empty};

use serde_json::{Value, json};

const TASK_ID_KEYS: [&str; 4] = ["TaskId", "taskId", "Id", "id"];

pub async fn run(
    args: &CreateTaskArgs,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    let payload = build_payload(args, settings)?;

    let base = resolve_base(settings)?;
    let client = connect(dispatcher, base, settings).await?;
    let response = client.create_task(&payload).await?;

    Ok(summarize(
        &payload,
        &client.base_urls().resource_origin(),
        response,
    ))
}

pub fn build_payload(
    args: &CreateTaskArgs,
    settings: &Settings,
) -> Result<CreateTaskPayload, CoreError> {
    let title = require_non_empty(&args.title, "Title")?;
    let description = require_non_empty(&args.description, "Description")?;
    let project_id = settings.require_project_id()?;
    let label_ids = parse_id_list(args.label_ids.as_deref().unwrap_or_default(), "label-ids")?;

    Ok(CreateTaskPayload::from(NewTask {
        title,
        description,
        project_id,
        epic_id: args.epic_id,
        label_ids,
        weight: args.weight,
        sprint_id: args.sprint_id,
        milestone_id: args.milestone_id,
    }))
}

/// Result object: the new task's ID plus the submitted fields, preferring
/// what the server echoed back.
pub fn summarize(payload: &CreateTaskPayload, base_url: &str, response: Value) -> Value {
    let task_id = first_present(&response, &TASK_ID_KEYS)
        .cloned()
        .unwrap_or(Value::Null);
    let title = first_present_or(&response, &["Title", "title"], json!(payload.title));
    let description = first_present_or(
        &response,
        &["Description", "description"],
        json!(payload.description),
    );
    let project_id = first_present_or(
        &response,
        &["projectId", "ProjectId"],
        json!(payload.project_id),
    );

    json!({
        "TaskId": task_id,
        "Title": title,
        "Description": description,
        "projectId": project_id,
        "baseUrl": base_url,
        "apiResponse": response,
    })
}
