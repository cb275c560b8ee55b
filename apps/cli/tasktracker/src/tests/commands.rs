// Unit tests for command input handling and result shapes
// HTTP behaviour is covered in integration_tests/commands.rs

use crate::cli::{CommentArgs, CreateTaskArgs, EntityArgs};
use crate::commands::{comment, create_task, get, resolve_target};

use tasktracker_core::api::{CreateTaskPayload, NewTask};
use tasktracker_core::config::{Settings, SettingsOverrides};
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::error::CoreError;
use tasktracker_core::input::EntityRef;

use std::time::Duration;

use serde_json::json;

fn settings_with(pairs: &'static [(&'static str, &'static str)]) -> Settings {
    Settings::resolve(&SettingsOverrides::default(), move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}

fn create_args() -> CreateTaskArgs {
    CreateTaskArgs {
        title: String::from("  Fix login  "),
        description: String::from("Steps"),
        project_id: None,
        epic_id: Some(191),
        label_ids: Some(String::from("6,73")),
        weight: Some(3),
        sprint_id: None,
        milestone_id: None,
    }
}

/// **VALUE**: A URL target needs no configured base URL.
///
/// **WHY THIS MATTERS**: `get --url ...` is meant to work on a machine with
/// only credentials configured.
///
/// **BUG THIS CATCHES**: Requiring `erp_base_url` before looking at `--url`.
#[test]
fn given_url_target_without_base_url_when_resolved_then_derives_from_url() {
    // GIVEN: No base URL anywhere
    let settings = settings_with(&[]);
    let args = EntityArgs {
        url: Some(String::from(
            "https://erp.example.com/tasktracker/projects/1/epics/191",
        )),
        ..EntityArgs::default()
    };

    // WHEN: Resolving the target
    let (entity, base) = resolve_target(&args, &settings).unwrap();

    // THEN: Entity and both hosts come from the URL
    assert_eq!(entity, EntityRef::epic(191));
    assert_eq!(base.resource_origin(), "https://erp.example.com");
    assert_eq!(base.auth_origin(), "https://id-erp.example.com");
}

#[test]
fn given_task_id_without_base_url_when_resolved_then_returns_config_error() {
    let settings = settings_with(&[]);
    let args = EntityArgs {
        task_id: Some(String::from("555")),
        ..EntityArgs::default()
    };

    let err = resolve_target(&args, &settings).unwrap_err();

    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn given_bad_task_id_when_resolved_then_validation_precedes_base_url_check() {
    let settings = settings_with(&[]);
    let args = EntityArgs {
        task_id: Some(String::from("55x")),
        ..EntityArgs::default()
    };

    match resolve_target(&args, &settings) {
        Err(CoreError::Validation(e)) => assert_eq!(e.message(), "Task ID must contain only digits"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_invalid_base_url_when_resolved_then_names_base_url() {
    let settings = settings_with(&[("erp_base_url", "erp.example.com")]);
    let args = EntityArgs {
        epic_id: Some(String::from("7")),
        ..EntityArgs::default()
    };

    let err = resolve_target(&args, &settings).unwrap_err();

    assert!(err.to_string().contains("Invalid base URL"));
}

/// **VALUE**: Create-task input is validated before any network call.
///
/// **BUG THIS CATCHES**: Sending a blank title, or losing the env project ID.
#[test]
fn given_create_args_when_payload_built_then_trims_and_uses_env_project() {
    let settings = settings_with(&[("erp_tasktracker_project_id", "12")]);

    let payload = create_task::build_payload(&create_args(), &settings).unwrap();

    assert_eq!(payload.title, "Fix login");
    assert_eq!(payload.project_id, 12);
    assert_eq!(payload.label_ids, vec![6, 73]);
    assert_eq!(payload.epic_id, Some(191));
    assert_eq!(payload.weight, Some(3));
}

#[test]
fn given_blank_title_when_payload_built_then_returns_validation_error() {
    let settings = settings_with(&[("erp_tasktracker_project_id", "12")]);
    let args = CreateTaskArgs {
        title: String::from("   "),
        ..create_args()
    };

    match create_task::build_payload(&args, &settings) {
        Err(CoreError::Validation(e)) => {
            assert_eq!(e.message(), "Title is required and cannot be empty");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_no_project_id_when_payload_built_then_returns_config_error() {
    let err = create_task::build_payload(&create_args(), &settings_with(&[])).unwrap_err();

    assert!(err.to_string().contains("projectId is required"));
}

#[test]
fn given_sparse_create_response_when_summarized_then_falls_back_to_payload() {
    let payload = CreateTaskPayload::from(NewTask {
        title: String::from("Fix login"),
        description: String::from("Steps"),
        project_id: 12,
        ..NewTask::default()
    });

    let summary = create_task::summarize(
        &payload,
        "https://erp.example.com",
        json!({"id": 901, "title": ""}),
    );

    assert_eq!(
        serde_json::to_string(&summary).unwrap(),
        concat!(
            r#"{"TaskId":901,"Title":"Fix login","Description":"Steps","projectId":12,"#,
            r#""baseUrl":"https://erp.example.com","apiResponse":{"id":901,"title":""}}"#
        )
    );
}

#[test]
fn given_non_object_create_response_when_summarized_then_task_id_is_null() {
    let payload = CreateTaskPayload::from(NewTask {
        title: String::from("T"),
        description: String::from("D"),
        project_id: 1,
        ..NewTask::default()
    });

    let summary = create_task::summarize(&payload, "https://erp.example.com", json!(true));

    assert_eq!(summary["TaskId"], json!(null));
    assert_eq!(summary["Title"], json!("T"));
    assert_eq!(summary["apiResponse"], json!(true));
}

#[test]
fn given_task_and_epic_data_when_summarized_then_shapes_differ() {
    let task = get::task_summary(555, &json!({"title": "t", "Description": "d"}));
    let epic = get::epic_summary(191, &json!({"Title": "e", "projectId": 4}));

    assert_eq!(task, json!({"TaskId": "555", "Title": "t", "Description": "d"}));
    assert_eq!(
        epic,
        json!({"ID": 191, "Title": "e", "Description": null, "ProjectId": 4})
    );
}

#[test]
fn given_epic_comment_when_summarized_then_uses_epic_id_key() {
    let summary = comment::summarize(
        EntityRef::epic(191),
        "https://erp.example.com",
        "Scope agreed",
        json!({"id": 1}),
    );

    assert_eq!(
        serde_json::to_string(&summary).unwrap(),
        r#"{"epicId":191,"baseUrl":"https://erp.example.com","commentText":"Scope agreed","apiResponse":{"id":1}}"#
    );
}

/// **VALUE**: A malformed `--parent-id` is reported as bad input even when no
/// base URL is configured.
///
/// **WHY THIS MATTERS**: Users fix one problem at a time; pointing at the
/// missing base URL first hides the typo they can fix right away.
///
/// **BUG THIS CATCHES**: Parsing the parent ID after the target and base URL
/// are resolved, which turns the validation error into a config error.
#[tokio::test]
async fn given_bad_parent_id_without_base_url_when_commenting_then_returns_validation_error() {
    // GIVEN: A task target by ID, no base URL, and a non-numeric parent ID
    let settings = settings_with(&[]);
    let dispatcher = Dispatcher::new(Duration::from_secs(1)).unwrap();
    let args = CommentArgs {
        target: EntityArgs {
            task_id: Some(String::from("555")),
            ..EntityArgs::default()
        },
        parent_id: Some(String::from("12a")),
        text: Some(String::from("Looks good")),
        text_file: None,
    };

    // WHEN: Running the command
    let result = comment::run(&args, &settings, &dispatcher).await;

    // THEN: The parent ID is rejected before configuration is consulted
    match result {
        Err(CoreError::Validation(e)) => {
            assert_eq!(e.message(), "Parent ID must contain only digits");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
