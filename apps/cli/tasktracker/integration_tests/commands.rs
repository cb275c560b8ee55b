use crate::helpers::{
    TEST_TOKEN, base_url, closed_port, dispatcher_for, mount_token, run, settings,
};

use tasktracker::cli::{
    ChangeLabelsArgs, Command, CommentArgs, CreateTaskArgs, EntityArgs,
};

use tasktracker_core::dispatch::Dispatcher;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task(id: &str) -> EntityArgs {
    EntityArgs {
        task_id: Some(id.to_string()),
        ..EntityArgs::default()
    }
}

/// **VALUE**: The browser-link workflow end to end, through the printed result.
///
/// **WHY THIS MATTERS**: This is the command agents and humans run most; the
/// printed JSON is the contract downstream scripts parse.
///
/// **BUG THIS CATCHES**: Requiring a base URL when `--url` is given, using
/// the wrong bearer token, or printing the raw task instead of the summary.
#[tokio::test]
async fn given_task_url_when_get_runs_then_prints_task_summary() {
    // GIVEN: Token and task endpoints; no base URL configured
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/task/query/get/555"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "Fix login",
            "Description": "Steps to reproduce",
            "Status": "Open"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::Get(EntityArgs {
        url: Some(format!(
            "{}/tasktracker/projects/1/tasks/555",
            base_url(&server)
        )),
        ..EntityArgs::default()
    });

    // WHEN: Running get
    let output = run(&command, &settings(None, None), &dispatcher_for(&server)).await;

    // THEN: Exit 0 and the pretty-printed summary
    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    assert_eq!(
        output.stdout,
        "{\n  \"TaskId\": \"555\",\n  \"Title\": \"Fix login\",\n  \"Description\": \"Steps to reproduce\"\n}\n"
    );
    assert!(output.stderr.is_empty());
}

/// **VALUE**: A 404 produces the HTTP diagnostic line and exit code 1.
///
/// **BUG THIS CATCHES**: Printing partial JSON to stdout on failure, or
/// dropping the response body from the diagnostic.
#[tokio::test]
async fn given_missing_task_when_get_runs_then_reports_http_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/task/query/get/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Task not found"}"#))
        .mount(&server)
        .await;

    let command = Command::Get(task("404"));
    let output = run(
        &command,
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 1);
    assert!(output.stdout.is_empty());
    assert_eq!(
        output.stderr,
        format!(
            "API HTTP error: url={}/api/tasktracker/task/query/get/404, status=404, reason=Not Found, body={{\"message\":\"Task not found\"}}\n",
            base_url(&server)
        )
    );
}

#[tokio::test]
async fn given_token_endpoint_rejects_when_command_runs_then_reports_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oidc/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let output = run(
        &Command::Comments(task("5")),
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 1);
    assert!(output.stderr.starts_with("API HTTP error: url=http://id-erp.example.test:"));
    assert!(output.stderr.contains("/oidc/connect/token, status=400, reason=Bad Request"));
}

#[tokio::test]
async fn given_unreachable_host_when_command_runs_then_reports_network_error() {
    // Identity host pinned to loopback, where nothing listens on the port
    let base = format!("http://localhost:{}", closed_port());
    let dispatcher = Dispatcher::builder()
        .timeout(Duration::from_secs(5))
        .resolve("id-localhost", "127.0.0.1:0".parse().unwrap())
        .no_proxy()
        .build()
        .unwrap();

    let output = run(
        &Command::Get(task("5")),
        &settings(Some(base), None),
        &dispatcher,
    )
    .await;

    assert_eq!(output.code, 1);
    assert!(
        output.stderr.starts_with("API network error: reason="),
        "stderr: {}",
        output.stderr
    );
}

#[tokio::test]
async fn given_epic_id_when_comments_runs_then_prints_raw_list() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasktracker/EpicComment"))
        .and(query_param("taskId", "191"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "text": "Привет"}])))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::Comments(EntityArgs {
        epic_id: Some(String::from("191")),
        ..EntityArgs::default()
    });
    let output = run(
        &command,
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    let printed: Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(printed, json!([{"id": 1, "text": "Привет"}]));
    assert!(output.stdout.contains("Привет"));
}

/// **VALUE**: Replies carry the parent ID and the summary echoes the text.
#[tokio::test]
async fn given_reply_text_file_when_comment_runs_then_posts_reply_and_prints_summary() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/tasktracker/taskComment/command/Create"))
        .and(body_json(json!({"taskId": 555, "parentId": 17, "text": "Готово", "files": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let text_file = dir.path().join("reply.md");
    std::fs::write(&text_file, "  Готово\n").unwrap();

    let command = Command::Comment(CommentArgs {
        target: task("555"),
        parent_id: Some(String::from("17")),
        text: None,
        text_file: Some(text_file),
    });
    let output = run(
        &command,
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    let printed: Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!({
            "taskId": 555,
            "baseUrl": base_url(&server),
            "commentText": "Готово",
            "apiResponse": {"id": 99}
        })
    );
}

/// **VALUE**: Invalid comment input fails before any request is made.
///
/// **BUG THIS CATCHES**: Fetching a token (and leaking a request) for an
/// invocation that can never succeed.
#[tokio::test]
async fn given_text_and_text_file_when_comment_runs_then_fails_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let command = Command::Comment(CommentArgs {
        target: task("555"),
        parent_id: None,
        text: Some(String::from("inline")),
        text_file: Some(std::path::PathBuf::from("comment.md")),
    });
    let output = run(
        &command,
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 1);
    assert!(output.stderr.starts_with(
        "Execution error: Validation Error: Use either --text or --text-file, not both"
    ));
}

#[tokio::test]
async fn given_empty_label_ids_when_change_labels_runs_then_prints_status_object() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasktracker/Task/command/ChangeLabels/555"))
        .and(body_json(json!({"taskId": 555, "labelIds": []})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::ChangeLabels(ChangeLabelsArgs {
        task_id: String::from("555"),
        label_ids: String::new(),
    });
    let output = run(
        &command,
        &settings(Some(base_url(&server)), None),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    assert_eq!(output.stdout, "{\n  \"status\": 204\n}\n");
}

#[tokio::test]
async fn given_new_task_when_create_task_runs_then_prints_summary_with_server_id() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/tasktracker/task/command/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TaskId": 901, "Title": "Fix login"})))
        .expect(1)
        .mount(&server)
        .await;

    let command = Command::CreateTask(CreateTaskArgs {
        title: String::from("Fix login"),
        description: String::from("Steps"),
        project_id: None,
        epic_id: None,
        label_ids: Some(String::from("6,73")),
        weight: None,
        sprint_id: None,
        milestone_id: None,
    });
    let output = run(
        &command,
        &settings(Some(base_url(&server)), Some("12")),
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 0, "stderr: {}", output.stderr);
    let printed: Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(printed["TaskId"], json!(901));
    assert_eq!(printed["projectId"], json!(12));
    assert_eq!(printed["baseUrl"], json!(base_url(&server)));
    assert_eq!(printed["apiResponse"]["Title"], json!("Fix login"));

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(sent["LabelIds"], json!([6, 73]));
    assert_eq!(sent["projectId"], json!(12));
}

#[tokio::test]
async fn given_missing_credentials_when_command_runs_then_reports_config_error() {
    let server = MockServer::start().await;
    let settings = tasktracker_core::config::Settings::resolve(
        &tasktracker_core::config::SettingsOverrides::default(),
        |_| None,
    );

    let output = run(
        &Command::Get(EntityArgs {
            url: Some(format!("{}/tasks/5", base_url(&server))),
            ..EntityArgs::default()
        }),
        &settings,
        &dispatcher_for(&server),
    )
    .await;

    assert_eq!(output.code, 1);
    assert!(output.stderr.starts_with(
        "Execution error: Config Error: Missing env vars: erp_client_id and/or erp_client_secret"
    ));
}
