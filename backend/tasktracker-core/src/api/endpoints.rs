//! TaskTracker REST paths.
//!
//! Casing differs between endpoints (`taskComment/command/Create`,
//! `epicComment/command/create`, `Task/command/ChangeLabels`) and is sent
//! exactly as the server expects.

use crate::auth::BaseUrls;
use crate::input::{EntityKind, EntityRef};

use const_format::concatcp;
use url::Url;

pub const API_ROOT: &str = "/api/tasktracker";

pub const CREATE_TASK_PATH: &str = concatcp!(API_ROOT, "/task/command/create");
pub const GET_TASK_PATH: &str = concatcp!(API_ROOT, "/task/query/get/");
pub const GET_EPIC_PATH: &str = concatcp!(API_ROOT, "/epic/query/get/");
pub const TASK_COMMENTS_PATH: &str = concatcp!(API_ROOT, "/TaskComment");
pub const EPIC_COMMENTS_PATH: &str = concatcp!(API_ROOT, "/EpicComment");
pub const CREATE_TASK_COMMENT_PATH: &str = concatcp!(API_ROOT, "/taskComment/command/Create");
pub const CREATE_EPIC_COMMENT_PATH: &str = concatcp!(API_ROOT, "/epicComment/command/create");
pub const CHANGE_LABELS_PATH: &str = concatcp!(API_ROOT, "/Task/command/ChangeLabels/");

/// Both comment listings filter by the `taskId` query parameter.
const COMMENTS_QUERY_KEY: &str = "taskId";

pub fn create_task(base: &BaseUrls) -> Result<Url, url::ParseError> {
    base.resource_url(CREATE_TASK_PATH)
}

pub fn get_entity(base: &BaseUrls, entity: EntityRef) -> Result<Url, url::ParseError> {
    let prefix = match entity.kind {
        EntityKind::Task => GET_TASK_PATH,
        EntityKind::Epic => GET_EPIC_PATH,
    };
    base.resource_url(&format!("{prefix}{}", entity.id))
}

pub fn list_comments(base: &BaseUrls, entity: EntityRef) -> Result<Url, url::ParseError> {
    let path = match entity.kind {
        EntityKind::Task => TASK_COMMENTS_PATH,
        EntityKind::Epic => EPIC_COMMENTS_PATH,
    };
    let mut url = base.resource_url(path)?;
    url.query_pairs_mut()
        .append_pair(COMMENTS_QUERY_KEY, &entity.id.to_string());
    Ok(url)
}

pub fn create_comment(base: &BaseUrls, kind: EntityKind) -> Result<Url, url::ParseError> {
    match kind {
        EntityKind::Task => base.resource_url(CREATE_TASK_COMMENT_PATH),
        EntityKind::Epic => base.resource_url(CREATE_EPIC_COMMENT_PATH),
    }
}

pub fn change_labels(base: &BaseUrls, task_id: u64) -> Result<Url, url::ParseError> {
    base.resource_url(&format!("{CHANGE_LABELS_PATH}{task_id}"))
}
