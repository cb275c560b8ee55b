// Shared fixtures: a wiremock server standing in for both the TaskTracker
// host and its `id-` identity host

use tasktracker_core::auth::TOKEN_ENDPOINT_PATH;
use tasktracker_core::dispatch::Dispatcher;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RESOURCE_HOST: &str = "erp.example.test";
pub const AUTH_HOST: &str = "id-erp.example.test";
pub const TEST_TOKEN: &str = "tok-123";

/// Dispatcher that resolves both hosts to the mock server.
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

/// `http://erp.example.test:<port>`
pub fn resource_origin(server: &MockServer) -> String {
    format!("http://{RESOURCE_HOST}:{}", server.address().port())
}

pub fn auth_host_header(server: &MockServer) -> String {
    format!("{AUTH_HOST}:{}", server.address().port())
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_ENDPOINT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": TEST_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600
            })),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Serve one raw HTTP/1.1 response on loopback and return the port.
///
/// wiremock always sends canonical reason phrases; this writes the status
/// line verbatim.
pub fn serve_raw_once(response: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buffer).unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    port
}
