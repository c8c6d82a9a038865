//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_engine::{Presentation, Settings};
use vigil_probe::{DEFAULT_STATUS_PATH, status_endpoint};

/// Start a mock server standing in for the site backend
pub async fn start_status_mock() -> MockServer {
    MockServer::start().await
}

/// Mount a healthy `/api/demo` response carrying `message`
pub async fn mount_status_message(server: &MockServer, message: &str) {
    Mock::given(method("GET"))
        .and(path(DEFAULT_STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": message })),
        )
        .mount(server)
        .await;
}

/// Mount an `/api/demo` response with a bare status code
pub async fn mount_status_code(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(DEFAULT_STATUS_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mount a healthy response that arrives after `delay`
pub async fn mount_slow_status(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(DEFAULT_STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "late" }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub fn endpoint_for(server: &MockServer) -> Url {
    status_endpoint(&server.uri(), DEFAULT_STATUS_PATH).expect("mock server uri is a valid origin")
}

/// Settings pointing at `server` with a short probe delay
pub fn settings_for(server: &MockServer, initial_delay: Duration) -> Settings {
    Settings {
        origin: server.uri(),
        initial_delay,
        ..Settings::default()
    }
}

pub fn presentation_for(server: &MockServer, initial_delay: Duration) -> Presentation {
    Presentation::from_settings(&settings_for(server, initial_delay))
        .expect("default settings with a mock origin are valid")
}

/// Poll until the landing status settles or `limit` passes
pub async fn wait_for_status(presentation: &Presentation, limit: Duration) -> Option<String> {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if presentation.status().is_some_and(|s| s.is_settled()) {
            return presentation.status_text();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    None
}
