// Fixtures for running commands against a wiremock server that answers for
// both the TaskTracker host and its `id-` identity host

use tasktracker::cli::Command;
use tasktracker::commands::execute_with;

use tasktracker_core::config::{Settings, SettingsOverrides};
use tasktracker_core::dispatch::Dispatcher;
use tasktracker_core::report::ErrorReporter;

use std::net::TcpListener;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RESOURCE_HOST: &str = "erp.example.test";
pub const AUTH_HOST: &str = "id-erp.example.test";
pub const TEST_TOKEN: &str = "tok-cli";

/// Outcome of one command run: exit code, stdout and stderr.
pub struct RunOutput {
    pub code: u8,
    pub stdout: String,
    pub stderr: String,
}

pub fn base_url(server: &MockServer) -> String {
    format!("http://{RESOURCE_HOST}:{}", server.address().port())
}

pub fn dispatcher_for(server: &MockServer) -> Dispatcher {
    let addr = *server.address();
    Dispatcher::builder()
        .timeout(Duration::from_secs(5))
        .resolve(RESOURCE_HOST, addr)
        .resolve(AUTH_HOST, addr)
        .no_proxy()
        .build()
        .unwrap()
}

/// Settings as if loaded from an environment with credentials and `base_url`.
pub fn settings(base_url: Option<String>, project_id: Option<&'static str>) -> Settings {
    Settings::resolve(&SettingsOverrides::default(), move |key| match key {
        "erp_client_id" => Some(String::from("agent")),
        "erp_client_secret" => Some(String::from("s3cret")),
        "erp_base_url" => base_url.clone(),
        "erp_tasktracker_project_id" => project_id.map(String::from),
        _ => None,
    })
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oidc/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": TEST_TOKEN})))
        .mount(server)
        .await;
}

pub async fn run(command: &Command, settings: &Settings, dispatcher: &Dispatcher) -> RunOutput {
    let mut stdout = Vec::new();
    let mut reporter = ErrorReporter::new(Vec::new());

    let code = execute_with(command, settings, dispatcher, &mut stdout, &mut reporter).await;

    RunOutput {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(reporter.into_inner()).unwrap(),
    }
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
