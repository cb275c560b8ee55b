// Unit tests for request body serialization
// Field names and casing must match the API exactly

use crate::api::{ChangeLabelsPayload, CommentPayload, CreateTaskPayload, NewTask};
use crate::input::{EntityKind, EntityRef, parse_id_list};

use serde_json::json;

/// **VALUE**: The create-task body carries every field the API expects,
/// in the expected casing, with defaults for fields the CLI does not expose.
///
/// **BUG THIS CATCHES**: A `rename_all` that turns `projectId` into
/// `ProjectId`, or omitting `null` fields the server requires.
#[test]
fn given_new_task_when_serialized_then_emits_full_payload_in_field_order() {
    // GIVEN: A minimal task
    let payload = CreateTaskPayload::from(NewTask {
        title: String::from("Fix login"),
        description: String::from("Steps to reproduce"),
        project_id: 12,
        label_ids: vec![6, 73],
        ..NewTask::default()
    });

    // WHEN: Serializing
    let body = serde_json::to_string(&payload).unwrap();

    // THEN: Keys appear exactly once, in declaration order
    assert_eq!(
        body,
        concat!(
            r#"{"LabelIds":[6,73],"AssigneeIds":[],"CurrentAssigneeId":null,"Weight":null,"#,
            r#""Description":"Steps to reproduce","Files":"","SprintId":null,"MilestoneId":null,"#,
            r#""TemplateId":null,"Title":"Fix login","EpicId":null,"projectId":12}"#
        )
    );
}

#[test]
fn given_task_target_when_comment_built_then_uses_task_comment_shape() {
    let payload = CommentPayload::new(EntityRef::task(555), Some(9), "Готово");

    assert_eq!(payload.kind(), EntityKind::Task);
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"taskId": 555, "parentId": 9, "text": "Готово", "files": null})
    );
}

#[test]
fn given_epic_target_when_comment_built_then_uses_epic_comment_shape() {
    let payload = CommentPayload::new(EntityRef::epic(191), None, "Scope agreed");

    assert_eq!(payload.kind(), EntityKind::Epic);
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"epicId": 191, "parentId": null, "text": "Scope agreed"})
    );
}

/// **VALUE**: An empty label list is sent, not omitted.
///
/// **WHY THIS MATTERS**: `--label-ids ""` is how users clear every label.
#[test]
fn given_empty_label_ids_when_serialized_then_sends_empty_list() {
    let payload = ChangeLabelsPayload {
        task_id: 555,
        label_ids: parse_id_list("", "label-ids").unwrap(),
    };

    assert_eq!(
        serde_json::to_string(&payload).unwrap(),
        r#"{"taskId":555,"labelIds":[]}"#
    );
}
