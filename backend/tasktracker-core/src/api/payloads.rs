//! Request bodies, serialized with the exact field names the API expects.

use crate::input::{EntityKind, EntityRef};

use serde::Serialize;

/// Body of `task/command/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskPayload {
    #[serde(rename = "LabelIds")]
    pub label_ids: Vec<u64>,
    #[serde(rename = "AssigneeIds")]
    pub assignee_ids: Vec<u64>,
    #[serde(rename = "CurrentAssigneeId")]
    pub current_assignee_id: Option<u64>,
    #[serde(rename = "Weight")]
    pub weight: Option<i64>,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Files")]
    pub files: String,
    #[serde(rename = "SprintId")]
    pub sprint_id: Option<u64>,
    #[serde(rename = "MilestoneId")]
    pub milestone_id: Option<u64>,
    #[serde(rename = "TemplateId")]
    pub template_id: Option<u64>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "EpicId")]
    pub epic_id: Option<u64>,
    #[serde(rename = "projectId")]
    pub project_id: u64,
}

/// Fields of a new task; the remaining payload fields get API defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project_id: u64,
    pub epic_id: Option<u64>,
    pub label_ids: Vec<u64>,
    pub weight: Option<i64>,
    pub sprint_id: Option<u64>,
    pub milestone_id: Option<u64>,
}

impl From<NewTask> for CreateTaskPayload {
    fn from(task: NewTask) -> Self {
        Self {
            label_ids: task.label_ids,
            assignee_ids: Vec::new(),
            current_assignee_id: None,
            weight: task.weight,
            description: task.description,
            files: String::new(),
            sprint_id: task.sprint_id,
            milestone_id: task.milestone_id,
            template_id: None,
            title: task.title,
            epic_id: task.epic_id,
            project_id: task.project_id,
        }
    }
}

/// Body of `taskComment/command/Create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCommentPayload {
    pub task_id: u64,
    pub parent_id: Option<u64>,
    pub text: String,
    pub files: Option<Vec<String>>,
}

/// Body of `epicComment/command/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpicCommentPayload {
    pub epic_id: u64,
    pub parent_id: Option<u64>,
    pub text: String,
}

/// A comment on either entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommentPayload {
    Task(TaskCommentPayload),
    Epic(EpicCommentPayload),
}

impl CommentPayload {
    pub fn new(target: EntityRef, parent_id: Option<u64>, text: impl Into<String>) -> Self {
        let text = text.into();
        match target.kind {
            EntityKind::Task => CommentPayload::Task(TaskCommentPayload {
                task_id: target.id,
                parent_id,
                text,
                files: None,
            }),
            EntityKind::Epic => CommentPayload::Epic(EpicCommentPayload {
                epic_id: target.id,
                parent_id,
                text,
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            CommentPayload::Task(_) => EntityKind::Task,
            CommentPayload::Epic(_) => EntityKind::Epic,
        }
    }
}

/// Body of `Task/command/ChangeLabels/{taskId}`; an empty list clears all labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLabelsPayload {
    pub task_id: u64,
    pub label_ids: Vec<u64>,
}
