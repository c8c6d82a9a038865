//! Status probe client.
//!
//! # Probe lifecycle
//!
//! [`HealthPingClient::probe`] issues exactly one `GET` against the status endpoint
//! and settles into a single [`PingState`]:
//!
//! | Outcome | State |
//! |---------|-------|
//! | 2xx with `{"message": ...}` | `Ok(message)` |
//! | non-2xx status | `HttpError(status)` |
//! | connect / DNS / refused, connection lost mid-body | `NetworkError` |
//! | timer fires first | `TimedOut` |
//! | anything else (undecodable body, task failure) | `Unknown` |
//!
//! The request runs as its own task. When the timeout fires first the task is
//! aborted, which drops the in-flight request and closes its connection. There
//! are no retries; a new probe is a new call.
//!
//! # Errors
//!
//! Probe failures are never returned as `Err`: every failure is classified into a
//! settled `PingState`. Only endpoint construction ([`status_endpoint`]) is fallible.

mod endpoint;

pub use endpoint::{DEFAULT_STATUS_PATH, EndpointError, status_endpoint};
pub use vigil_types::PingState;

use std::sync::OnceLock;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable, Aborted};
use reqwest::RequestBuilder;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tokio::task::JoinHandle;
use url::Url;

/// Default bound on a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

const CONNECT_TIMEOUT_SECS: u64 = 10;
const POOL_IDLE_TIMEOUT_SECS: u64 = 30;

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!("Failed to build probe HTTP client: {e}. Falling back to defaults.");
            reqwest::Client::new()
        })
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("vigil/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
        .default_headers(default_headers)
}

/// Spawned request task. Aborted on drop, so a probe future that is itself
/// cancelled (e.g. by view teardown) takes its request down with it.
struct InFlight {
    task: JoinHandle<Result<PingState, Aborted>>,
    abort_handle: AbortHandle,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Body of a successful status response.
#[derive(Debug, Deserialize)]
struct StatusBody {
    message: String,
}

/// Issues bounded, cancellable reachability probes.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HealthPingClient {
    client: reqwest::Client,
}

impl Default for HealthPingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthPingClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: http_client().clone(),
        }
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Probe `endpoint` once, bounded by `timeout`.
    ///
    /// Must be called from within a tokio runtime: the request is spawned so the
    /// timeout can abort it.
    pub async fn probe(&self, endpoint: &Url, timeout: Duration) -> PingState {
        let request = self
            .client
            .get(endpoint.clone())
            .header(CONTENT_TYPE, "application/json");

        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let mut in_flight = InFlight {
            task: tokio::spawn(Abortable::new(fetch_status(request), abort_registration)),
            abort_handle,
        };

        // The timer lives only for this await; it is released on every path.
        let state = match tokio::time::timeout(timeout, &mut in_flight.task).await {
            Ok(Ok(Ok(state))) => state,
            Ok(Ok(Err(_aborted))) => PingState::TimedOut,
            Ok(Err(join_error)) => {
                tracing::warn!(error = %join_error, "Status probe task failed");
                PingState::Unknown
            }
            Err(_elapsed) => {
                in_flight.abort_handle.abort();
                PingState::TimedOut
            }
        };

        tracing::debug!(
            endpoint = %endpoint,
            timeout_ms = timeout.as_millis(),
            state = ?state,
            "Status probe settled"
        );
        state
    }
}

async fn fetch_status(request: RequestBuilder) -> PingState {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let state = classify_transport_error(&e);
            tracing::warn!(error = %e, state = ?state, "Status probe request failed");
            return state;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = %status, "Status probe returned error status");
        return PingState::HttpError(status.as_u16());
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Status probe connection failed mid-body");
            return PingState::NetworkError;
        }
    };

    match serde_json::from_slice::<StatusBody>(&body) {
        Ok(body) => PingState::Ok(body.message),
        Err(e) => {
            tracing::warn!(error = %e, "Status probe body could not be decoded");
            PingState::Unknown
        }
    }
}

fn classify_transport_error(error: &reqwest::Error) -> PingState {
    if error.is_timeout() {
        PingState::TimedOut
    } else if error.is_connect() || error.is_request() {
        PingState::NetworkError
    } else {
        PingState::Unknown
    }
}
