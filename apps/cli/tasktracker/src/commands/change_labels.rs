use crate::cli::ChangeLabelsArgs;
use crate::commands::{connect, resolve_base};

use tasktracker_core::api::ChangeLabelsPayload;
use tasktracker_core::config::Settings;
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;
use tasktracker_core::input::{parse_id, parse_id_list};

use serde_json::Value;

pub async fn run(
    args: &ChangeLabelsArgs,
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<Value, CoreError> {
    let payload = ChangeLabelsPayload {
        task_id: parse_id(&args.task_id, "Task ID")?,
        label_ids: parse_id_list(&args.label_ids, "label-ids")?,
    };

    let base = resolve_base(settings)?;
    let client = connect(dispatcher, base, settings).await?;
    client.change_labels(&payload).await
}
