//! End-to-end status probe behavior against a mock backend.

use std::time::{Duration, Instant};

use vigil_engine::{HealthPingClient, PingState, StatusIndicator};

use crate::common::{
    endpoint_for, mount_slow_status, mount_status_code, mount_status_message, start_status_mock,
};

#[tokio::test]
async fn test_probe_reports_server_message() {
    let server = start_status_mock().await;
    mount_status_message(&server, "Hello from Express server").await;

    let state = HealthPingClient::new()
        .probe(&endpoint_for(&server), Duration::from_secs(3))
        .await;

    assert_eq!(state, PingState::Ok("Hello from Express server".into()));
    assert_eq!(state.display_text(), "Hello from Express server");
}

#[tokio::test]
async fn test_probe_maps_server_errors() {
    for status in [400, 404, 500, 503] {
        let server = start_status_mock().await;
        mount_status_code(&server, status).await;

        let state = HealthPingClient::new()
            .probe(&endpoint_for(&server), Duration::from_secs(3))
            .await;
        assert_eq!(state, PingState::HttpError(status));
        assert_eq!(state.display_text(), "API connection unavailable");
    }
}

#[tokio::test]
async fn test_probe_timeout_aborts_slow_request() {
    let server = start_status_mock().await;
    mount_slow_status(&server, Duration::from_secs(10)).await;

    let started = Instant::now();
    let state = HealthPingClient::new()
        .probe(&endpoint_for(&server), Duration::from_millis(200))
        .await;

    assert_eq!(state, PingState::TimedOut);
    assert_eq!(state.display_text(), "Request timeout - server unavailable");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_indicator_publishes_single_settled_state() {
    let server = start_status_mock().await;
    mount_status_code(&server, 500).await;

    let mut indicator = StatusIndicator::spawn(
        HealthPingClient::new(),
        endpoint_for(&server),
        Duration::from_millis(20),
        Duration::from_secs(3),
    );
    assert_eq!(indicator.state(), PingState::Pending);

    let settled = indicator.settled().await;
    assert_eq!(settled, PingState::HttpError(500));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(indicator.state(), PingState::HttpError(500));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
