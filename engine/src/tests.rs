//! Unit tests for the presentation state machine.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use vigil_probe::{DEFAULT_STATUS_PATH, status_endpoint};
use vigil_types::{STATUS_PLACEHOLDER, case_library};

#[derive(Default)]
struct RecordingSurface {
    targets: Vec<&'static str>,
    scrolled: Vec<String>,
}

impl RenderSurface for RecordingSurface {
    fn contains_target(&self, id: &str) -> bool {
        self.targets.iter().any(|t| *t == id)
    }

    fn scroll_into_view(&mut self, id: &str, _request: ScrollRequest) {
        self.scrolled.push(id.to_owned());
    }
}

fn analysis_surface() -> RecordingSurface {
    RecordingSurface {
        targets: vec!["modules", "demo", "cases", "about"],
        scrolled: Vec::new(),
    }
}

async fn status_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/demo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Hello from Express server" })),
        )
        .mount(&server)
        .await;
    server
}

fn presentation(server: &MockServer, initial_delay: Duration) -> Presentation {
    let probe = ProbeTarget {
        initial_delay,
        ..ProbeTarget::new(status_endpoint(&server.uri(), DEFAULT_STATUS_PATH).unwrap())
    };
    Presentation::new(
        case_library(),
        probe,
        Duration::from_secs(3),
        Duration::from_millis(100),
    )
}

#[tokio::test]
async fn starts_unrouted() {
    let server = status_server().await;
    let presentation = presentation(&server, Duration::from_secs(60));
    assert_eq!(presentation.route(), None);
    assert_eq!(presentation.current_phase(), None);
    assert_eq!(presentation.status_text(), None);
    assert!(!presentation.should_quit());
}

#[tokio::test]
async fn landing_mounts_rotator_and_status() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));

    assert_eq!(presentation.navigate("/"), Route::Landing);
    assert_eq!(presentation.current_phase(), Some(0));
    assert_eq!(presentation.status(), Some(PingState::Pending));
    assert_eq!(presentation.status_text().as_deref(), Some(STATUS_PLACEHOLDER));
}

#[tokio::test]
async fn landing_status_settles() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::ZERO);
    presentation.navigate("/");

    let settled = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if presentation.status().is_some_and(|s| s.is_settled()) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(settled.is_ok(), "status never settled");
    assert_eq!(
        presentation.status_text().as_deref(),
        Some("Hello from Express server")
    );
}

#[tokio::test]
async fn leaving_landing_cancels_deferred_probe() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_millis(100));

    presentation.navigate("/");
    presentation.navigate("/vigilum");
    assert_eq!(presentation.current_phase(), None);
    assert_eq!(presentation.status(), None);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn re_entering_landing_mounts_fresh_view() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));

    presentation.navigate("/");
    presentation.navigate("/vigilum#demo");
    presentation.navigate("/");
    assert_eq!(presentation.current_phase(), Some(0));
    assert_eq!(presentation.status(), Some(PingState::Pending));
}

#[tokio::test]
async fn analysis_fragment_scrolls_after_deferral() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    let mut surface = analysis_surface();

    assert_eq!(presentation.navigate("/vigilum#cases"), Route::Analysis);
    assert_eq!(presentation.pending_scroll(), Some("cases"));
    assert_eq!(presentation.tick(Duration::from_millis(60), &mut surface), None);
    assert_eq!(
        presentation.tick(Duration::from_millis(60), &mut surface),
        Some(ScrollOutcome::Scrolled("cases".into()))
    );
    assert_eq!(surface.scrolled, ["cases"]);
}

#[tokio::test]
async fn same_location_twice_scrolls_twice() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    let mut surface = analysis_surface();

    for _ in 0..2 {
        presentation.navigate("/vigilum#demo");
        presentation.tick(Duration::from_millis(100), &mut surface);
    }
    assert_eq!(surface.scrolled, ["demo", "demo"]);
}

#[tokio::test]
async fn leaving_analysis_discards_pending_scroll() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    let mut surface = analysis_surface();

    presentation.navigate("/vigilum#about");
    presentation.navigate("/");
    assert_eq!(presentation.pending_scroll(), None);
    assert_eq!(presentation.tick(Duration::from_secs(1), &mut surface), None);
    assert!(surface.scrolled.is_empty());
}

#[tokio::test]
async fn analysis_without_fragment_does_not_scroll() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    let mut surface = analysis_surface();

    presentation.navigate("/vigilum");
    assert_eq!(presentation.pending_scroll(), None);
    assert_eq!(presentation.tick(Duration::from_secs(1), &mut surface), None);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    presentation.navigate("/");
    assert_eq!(presentation.navigate("/pricing#demo"), Route::NotFound);
    assert_eq!(presentation.current_phase(), None);
    assert_eq!(presentation.pending_scroll(), None);
}

#[tokio::test]
async fn navigation_closes_menu() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    presentation.navigate("/");

    presentation.toggle_menu();
    assert!(presentation.menu().is_open());
    presentation.navigate("/vigilum#modules");
    assert_eq!(presentation.menu(), MenuState::Closed);
}

#[tokio::test]
async fn case_selection_does_not_scroll() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    let mut surface = analysis_surface();
    presentation.navigate("/vigilum");

    assert_eq!(presentation.select_case(2), SelectOutcome::Selected);
    assert_eq!(presentation.select_case(9), SelectOutcome::Rejected);
    assert_eq!(presentation.explorer().current().id, "L023");
    assert_eq!(presentation.select_previous_case(), SelectOutcome::Selected);
    assert_eq!(presentation.explorer().current().id, "L017");
    assert_eq!(presentation.tick(Duration::from_secs(1), &mut surface), None);
    assert!(surface.scrolled.is_empty());
}

#[tokio::test]
async fn quit_is_sticky() {
    let server = status_server().await;
    let mut presentation = presentation(&server, Duration::from_secs(60));
    presentation.request_quit();
    presentation.navigate("/");
    assert!(presentation.should_quit());
}

#[test]
fn from_settings_rejects_bad_origin() {
    let settings = Settings {
        origin: "not a url".into(),
        ..Settings::default()
    };
    assert!(matches!(
        Presentation::from_settings(&settings),
        Err(SettingsError::Endpoint(_))
    ));
}

#[test]
fn from_settings_uses_builtin_library() {
    let presentation = Presentation::from_settings(&Settings::default()).unwrap();
    assert_eq!(presentation.explorer().catalog().len(), case_library().len());
    assert_eq!(presentation.phases().len(), clause_phases().len());
}
