use crate::cli::CommentArgs;
use crate::commands::{connect, resolve_target};

use tasktracker_core::api::CommentPayload;
use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;
use tasktracker_core::input::{EntityKind, EntityRef, parse_optional_id, resolve_comment_text};

use log::debug;
use serde_json::{Map, Value};

pub async fn run(
    args: &CommentArgs,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    let text = resolve_comment_text(args.text.as_deref(), args.text_file.as_deref())?;
    let parent_id = parse_optional_id(args.parent_id.as_deref(), "Parent ID")?;
    let (target, base) = resolve_target(&args.target, settings)?;

    if let Some(parent_id) = parent_id {
        debug!("Replying to comment {parent_id}");
    }

    let payload = CommentPayload::new(target, parent_id, text.as_str());
    let client = connect(dispatcher, base, settings).await?;
    let response = client.create_comment(&payload).await?;

    Ok(summarize(
        target,
        &client.base_urls().resource_origin(),
        &text,
        response,
    ))
}

/// `{taskId|epicId, baseUrl, commentText, apiResponse}`
pub fn summarize(target: EntityRef, base_url: &str, text: &str, response: Value) -> Value {
    let id_key = match target.kind {
        EntityKind::Task => "taskId",
        EntityKind::Epic => "epicId",
    };

    let mut result = Map::new();
    result.insert(id_key.to_string(), Value::from(target.id));
    result.insert("baseUrl".to_string(), Value::from(base_url));
    result.insert("commentText".to_string(), Value::from(text));
    result.insert("apiResponse".to_string(), response);

    Value::Object(result)
}
