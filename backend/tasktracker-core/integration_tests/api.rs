use crate::helpers::{
    RESOURCE_HOST, TEST_TOKEN, dispatcher_for, mount_token, resource_origin,
};

use tasktracker_core::api::{
    ChangeLabelsPayload, CommentPayload, CreateTaskPayload, NewTask, TaskTrackerClient,
    first_present, first_present_or,
};
use tasktracker_core::auth::{
    Credentials, INVALID_TASKTRACKER_URL_MESSAGE, derive_base_urls,
};
use tasktracker_core::error::{CoreError, DispatchError};
use tasktracker_core::input::{EntityRef, parse_entity_url};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::from_parts(Some(String::from("agent")), Some(String::from("s3cret"))).unwrap()
}

fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

/// **VALUE**: A web URL alone is enough to authenticate and fetch the task.
///
/// **WHY THIS MATTERS**: This is the main workflow: paste a task link from
/// the browser, get its JSON back.
///
/// **BUG THIS CATCHES**: Deriving the auth host from the wrong input, dropping
/// the port, or issuing the GET before the token is available.
#[tokio::test]
async fn given_task_web_url_when_fetched_then_authenticates_and_gets_task() {
    // GIVEN: Token and task endpoints behind the resolved hosts
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/task/query/get/555"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"title": "Fix login", "Description": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = format!(
        "{}/tasktracker/projects/1/tasks/555",
        resource_origin(&server)
    );
    let dispatcher = dispatcher_for(&server);

    // WHEN: Resolving the URL and fetching
    let base = derive_base_urls(&url, INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let entity = parse_entity_url(&url).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();
    let task = client.get_entity(entity).await.unwrap();

    // THEN: Both hosts were derived from the URL and the task came back
    assert_eq!(entity, EntityRef::task(555));
    assert_eq!(client.base_urls().resource_origin(), resource_origin(&server));
    assert!(client.base_urls().auth_origin().contains(&format!("id-{RESOURCE_HOST}")));
    assert_eq!(first_present_or(&task, &["Title", "title"], json!(null)), json!("Fix login"));
}

#[tokio::test]
async fn given_epic_when_listing_comments_then_queries_epic_comments_by_task_id_key() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/EpicComment"))
        .and(query_param("taskId", "191"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"text": "hi"}])))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();

    let comments = client.list_comments(EntityRef::epic(191)).await.unwrap();

    assert_eq!(comments, json!([{"text": "hi"}]));
}

#[tokio::test]
async fn given_task_comment_when_created_then_posts_to_task_comment_endpoint() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/tasktracker/taskComment/command/Create"))
        .and(body_json(json!({"taskId": 555, "parentId": null, "text": "Done", "files": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();

    let response = client
        .create_comment(&CommentPayload::new(EntityRef::task(555), None, "Done"))
        .await
        .unwrap();

    assert_eq!(response, json!({"id": 42}));
}

/// **VALUE**: Clearing labels sends an explicit empty list via PATCH.
///
/// **BUG THIS CATCHES**: Using POST, or skipping `labelIds` when empty.
#[tokio::test]
async fn given_empty_label_list_when_changing_labels_then_patches_empty_list() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasktracker/Task/command/ChangeLabels/555"))
        .and(body_json(json!({"taskId": 555, "labelIds": []})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();

    let response = client
        .change_labels(&ChangeLabelsPayload {
            task_id: 555,
            label_ids: Vec::new(),
        })
        .await
        .unwrap();

    assert_eq!(response, json!({"status": 200}));
}

#[tokio::test]
async fn given_new_task_when_created_then_posts_payload_and_returns_response() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/tasktracker/task/command/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": 901})))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();
    let payload = CreateTaskPayload::from(NewTask {
        title: String::from("Title"),
        description: String::from("Body"),
        project_id: 12,
        ..NewTask::default()
    });

    let response = client.create_task(&payload).await.unwrap();

    assert_eq!(
        first_present(&response, &["TaskId", "taskId", "Id", "id"]),
        Some(&json!(901))
    );
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["projectId"], json!(12));
    assert_eq!(body["Title"], json!("Title"));
}

/// **VALUE**: A 404 keeps the failing URL so the diagnostic can name it.
#[tokio::test]
async fn given_missing_epic_when_fetched_then_returns_http_error_for_epic_url() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/epic/query/get/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("epic not found"))
        .mount(&server)
        .await;

    let dispatcher = dispatcher_for(&server);
    let base = derive_base_urls(&resource_origin(&server), INVALID_TASKTRACKER_URL_MESSAGE).unwrap();
    let client = TaskTrackerClient::connect(&dispatcher, base, &credentials())
        .await
        .unwrap();

    let err = client.get_entity(EntityRef::epic(7)).await.unwrap_err();

    match err.dispatch_error() {
        Some(DispatchError::Http { url, body, .. }) => {
            assert!(url.ends_with("/api/tasktracker/epic/query/get/7"));
            assert_eq!(body, "epic not found");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert!(matches!(err, CoreError::Dispatch(_)));
}

#[test]
fn given_responses_with_mixed_casing_when_picking_fields_then_first_usable_key_wins() {
    let data = json!({"Title": "", "title": "lower", "Id": null, "id": 3});

    assert_eq!(first_present(&data, &["Id", "id"]), Some(&json!(null)));
    assert_eq!(first_present_or(&data, &["Id"], json!(0)), json!(0));
    assert_eq!(first_present_or(&data, &["Title"], json!("fallback")), json!("fallback"));
    assert_eq!(first_present_or(&data, &["title"], json!("fallback")), json!("lower"));
    assert_eq!(first_present(&json!([1, 2]), &["id"]), None);
}
