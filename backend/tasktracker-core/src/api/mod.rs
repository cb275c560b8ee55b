//! TaskTracker API calls.
//!
//! [`TaskTrackerClient::connect`] fetches a fresh token from the identity
//! host; every method then issues exactly one request with that token.

pub mod endpoints;
pub mod payloads;

pub use payloads::{
    ChangeLabelsPayload, CommentPayload, CreateTaskPayload, EpicCommentPayload, NewTask,
    TaskCommentPayload,
};

use crate::auth::{BaseUrls, Credentials, get_token};
use crate::dispatch::Dispatcher;
use crate::error::{CoreError, DispatchError};
use crate::input::EntityRef;

use common::RedactedSecret;

use log::info;
use serde_json::Value;

pub struct TaskTrackerClient<'a> {
    dispatcher: &'a Dispatcher,
    base: BaseUrls,
    token: RedactedSecret,
}

impl<'a> TaskTrackerClient<'a> {
    /// Authenticate against `base.auth_base` and return a ready client.
    pub async fn connect(
        dispatcher: &'a Dispatcher,
        base: BaseUrls,
        credentials: &Credentials,
    ) -> Result<Self, CoreError> {
        let token = get_token(dispatcher, &base.auth_base, credentials).await?;
        Ok(Self::with_token(dispatcher, base, token))
    }

    /// Client for an already obtained token.
    pub fn with_token(dispatcher: &'a Dispatcher, base: BaseUrls, token: RedactedSecret) -> Self {
        Self {
            dispatcher,
            base,
            token,
        }
    }

    pub fn base_urls(&self) -> &BaseUrls {
        &self.base
    }

    pub async fn create_task(&self, payload: &CreateTaskPayload) -> Result<Value, CoreError> {
        let url = endpoints::create_task(&self.base).map_err(DispatchError::from)?;
        info!("Creating task '{}' in project {}", payload.title, payload.project_id);
        Ok(self.dispatcher.post_json(&url, &self.token, payload).await?)
    }

    /// Fetch a task or an epic.
    pub async fn get_entity(&self, entity: EntityRef) -> Result<Value, CoreError> {
        let url =
            endpoints::get_entity(&self.base, entity).map_err(DispatchError::from)?;
        info!("Fetching {} {}", entity.kind, entity.id);
        Ok(self.dispatcher.get_json(&url, &self.token).await?)
    }

    pub async fn list_comments(&self, entity: EntityRef) -> Result<Value, CoreError> {
        let url =
            endpoints::list_comments(&self.base, entity).map_err(DispatchError::from)?;
        info!("Listing comments of {} {}", entity.kind, entity.id);
        Ok(self.dispatcher.get_json(&url, &self.token).await?)
    }

    pub async fn create_comment(&self, payload: &CommentPayload) -> Result<Value, CoreError> {
        let url = endpoints::create_comment(&self.base, payload.kind())
            .map_err(DispatchError::from)?;
        info!("Posting {} comment", payload.kind());
        Ok(self.dispatcher.post_json(&url, &self.token, payload).await?)
    }

    pub async fn change_labels(&self, payload: &ChangeLabelsPayload) -> Result<Value, CoreError> {
        let url = endpoints::change_labels(&self.base, payload.task_id)
            .map_err(DispatchError::from)?;
        info!(
            "Setting {} label(s) on task {}",
            payload.label_ids.len(),
            payload.task_id
        );
        Ok(self.dispatcher.patch_json(&url, &self.token, payload).await?)
    }
}

/// First key of `keys` present in a JSON object, in order.
///
/// Responses mix `Title`/`title`-style casing; non-objects yield `None`.
pub fn first_present<'v>(data: &'v Value, keys: &[&str]) -> Option<&'v Value> {
    let object = data.as_object()?;
    keys.iter().find_map(|key| object.get(*key))
}

/// Like [`first_present`], but treats `null` and `""` as absent and falls
/// back to `fallback`.
pub fn first_present_or(data: &Value, keys: &[&str], fallback: Value) -> Value {
    match first_present(data, keys) {
        Some(Value::Null) | None => fallback,
        Some(Value::String(text)) if text.is_empty() => fallback,
        Some(value) => value.clone(),
    }
}
