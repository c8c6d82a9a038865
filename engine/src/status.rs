//! Deferred status probe for the landing view.

use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::watch;
use url::Url;

use vigil_probe::{DEFAULT_PROBE_TIMEOUT, HealthPingClient};
use vigil_types::PingState;

/// Delay between mounting the landing view and issuing the probe.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Owns one deferred probe and publishes its state.
///
/// Reads `Pending` until the probe settles, then exactly one settled state.
/// Dropping the indicator (or calling [`StatusIndicator::cancel`]) aborts the
/// delay and any in-flight request.
#[derive(Debug)]
pub struct StatusIndicator {
    state: watch::Receiver<PingState>,
    abort_handle: AbortHandle,
}

impl StatusIndicator {
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        client: HealthPingClient,
        endpoint: Url,
        initial_delay: Duration,
        timeout: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(PingState::Pending);
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        let probe = async move {
            tokio::time::sleep(initial_delay).await;
            let state = client.probe(&endpoint, timeout).await;
            // Receiver gone means the view was torn down; nothing to publish.
            let _ = tx.send(state);
        };
        tokio::spawn(Abortable::new(probe, abort_registration));

        tracing::debug!(
            delay_ms = initial_delay.as_millis(),
            timeout_ms = timeout.as_millis(),
            "Status probe scheduled"
        );

        Self {
            state: rx,
            abort_handle,
        }
    }

    /// Spawn with the default one-second delay and probe timeout.
    #[must_use]
    pub fn spawn_default(client: HealthPingClient, endpoint: Url) -> Self {
        Self::spawn(client, endpoint, DEFAULT_INITIAL_DELAY, DEFAULT_PROBE_TIMEOUT)
    }

    #[must_use]
    pub fn state(&self) -> PingState {
        self.state.borrow().clone()
    }

    /// Status line text for the current state.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().display_text().into_owned()
    }

    /// Abort the pending probe. The state stays wherever it was.
    pub fn cancel(&self) {
        self.abort_handle.abort();
    }

    /// Wait until the probe settles.
    ///
    /// If the probe was cancelled first, returns the last published state.
    pub async fn settled(&mut self) -> PingState {
        let settled = match self.state.wait_for(PingState::is_settled).await {
            Ok(state) => Some(state.clone()),
            Err(_closed) => None,
        };
        settled.unwrap_or_else(|| self.state())
    }
}

impl Drop for StatusIndicator {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_probe::{DEFAULT_STATUS_PATH, status_endpoint};
    use vigil_types::STATUS_PLACEHOLDER;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_ok(server: &MockServer, message: &str) {
        Mock::given(method("GET"))
            .and(path("/api/demo"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": message })),
            )
            .mount(server)
            .await;
    }

    fn endpoint_for(server: &MockServer) -> Url {
        status_endpoint(&server.uri(), DEFAULT_STATUS_PATH).unwrap()
    }

    #[tokio::test]
    async fn settles_to_ok_after_delay() {
        let server = MockServer::start().await;
        mount_ok(&server, "Hello from Express server").await;

        let mut indicator = StatusIndicator::spawn(
            HealthPingClient::new(),
            endpoint_for(&server),
            Duration::from_millis(10),
            Duration::from_secs(3),
        );

        let state = indicator.settled().await;
        assert_eq!(state, PingState::Ok("Hello from Express server".into()));
        assert_eq!(indicator.text(), "Hello from Express server");
    }

    #[tokio::test]
    async fn shows_placeholder_until_delay_elapses() {
        let server = MockServer::start().await;
        mount_ok(&server, "ok").await;

        let indicator = StatusIndicator::spawn(
            HealthPingClient::new(),
            endpoint_for(&server),
            Duration::from_secs(60),
            Duration::from_secs(3),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(indicator.state(), PingState::Pending);
        assert_eq!(indicator.text(), STATUS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn drop_before_delay_sends_no_request() {
        let server = MockServer::start().await;
        mount_ok(&server, "ok").await;

        let indicator = StatusIndicator::spawn(
            HealthPingClient::new(),
            endpoint_for(&server),
            Duration::from_millis(100),
            Duration::from_secs(3),
        );
        drop(indicator);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let received = server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn cancelled_indicator_settles_to_last_state() {
        let server = MockServer::start().await;
        mount_ok(&server, "ok").await;

        let mut indicator = StatusIndicator::spawn(
            HealthPingClient::new(),
            endpoint_for(&server),
            Duration::from_secs(60),
            Duration::from_secs(3),
        );
        indicator.cancel();

        let state = tokio::time::timeout(Duration::from_secs(5), indicator.settled())
            .await
            .unwrap();
        assert_eq!(state, PingState::Pending);
    }

    #[tokio::test]
    async fn server_error_is_published() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/demo"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let mut indicator = StatusIndicator::spawn(
            HealthPingClient::new(),
            endpoint_for(&server),
            Duration::ZERO,
            Duration::from_secs(3),
        );

        assert_eq!(indicator.settled().await, PingState::HttpError(503));
        assert_eq!(indicator.text(), "API connection unavailable");
    }
}
