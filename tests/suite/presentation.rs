//! Presentation flows driven the way the binary drives them.

use std::time::Duration;

use vigil_engine::{Route, ScrollOutcome, SelectOutcome};
use vigil_tui::{PageSurface, advance_frame, draw};
use vigil_types::STATUS_PLACEHOLDER;

use ratatui::{Terminal, backend::TestBackend};

use crate::common::{
    mount_status_message, presentation_for, start_status_mock, wait_for_status,
};

const FRAME: Duration = Duration::from_millis(16);

#[tokio::test]
async fn test_landing_status_goes_from_placeholder_to_message() {
    let server = start_status_mock().await;
    mount_status_message(&server, "Hello from Express server").await;

    let mut presentation = presentation_for(&server, Duration::from_millis(50));
    assert_eq!(presentation.navigate("/"), Route::Landing);
    assert_eq!(presentation.status_text().as_deref(), Some(STATUS_PLACEHOLDER));

    let text = wait_for_status(&presentation, Duration::from_secs(5)).await;
    assert_eq!(text.as_deref(), Some("Hello from Express server"));
}

#[tokio::test]
async fn test_hash_navigation_scrolls_rendered_section() {
    let server = start_status_mock().await;
    let mut presentation = presentation_for(&server, Duration::from_secs(60));
    let mut surface = PageSurface::new();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

    presentation.navigate("/");
    presentation.navigate("/vigilum#about");

    let mut outcome = None;
    for _ in 0..40 {
        if let Some(done) = presentation.tick(FRAME, &mut surface) {
            outcome = Some(done);
        }
        surface.advance(FRAME);
        terminal
            .draw(|frame| draw(frame, &presentation, &mut surface))
            .unwrap();
    }

    assert_eq!(outcome, Some(ScrollOutcome::Scrolled("about".into())));
    assert!(surface.offset() > 0);
    assert!(!surface.is_animating());
}

#[tokio::test]
async fn test_missing_section_is_ignored() {
    let server = start_status_mock().await;
    let mut presentation = presentation_for(&server, Duration::from_secs(60));
    let mut surface = PageSurface::new();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

    presentation.navigate("/vigilum#pricing");
    terminal
        .draw(|frame| draw(frame, &presentation, &mut surface))
        .unwrap();

    let outcome = presentation.tick(Duration::from_millis(100), &mut surface);
    assert_eq!(outcome, Some(ScrollOutcome::MissingTarget("pricing".into())));
    assert_eq!(surface.offset(), 0);
}

#[tokio::test]
async fn test_leaving_landing_stops_probe_and_rotator() {
    let server = start_status_mock().await;
    mount_status_message(&server, "ok").await;

    let mut presentation = presentation_for(&server, Duration::from_millis(100));
    presentation.navigate("/");
    assert_eq!(presentation.current_phase(), Some(0));

    presentation.navigate("/vigilum#cases");
    assert_eq!(presentation.current_phase(), None);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_case_selection_is_bounded() {
    let server = start_status_mock().await;
    let mut presentation = presentation_for(&server, Duration::from_secs(60));
    presentation.navigate("/vigilum#cases");

    let count = presentation.explorer().catalog().len();
    assert_eq!(presentation.select_case(count - 1), SelectOutcome::Selected);
    assert_eq!(presentation.select_case(count), SelectOutcome::Rejected);
    assert_eq!(presentation.select_next_case(), SelectOutcome::Rejected);
    assert_eq!(
        presentation.explorer().selected_index(),
        count - 1,
        "rejected selection must not move the cursor"
    );

    for case in presentation.explorer().catalog() {
        let risk = case.risk_level.value();
        assert!((0.0..=1.0).contains(&risk), "{} risk {risk}", case.id);
    }
}

#[tokio::test]
async fn test_navigation_during_slow_frame_still_scrolls() {
    let server = start_status_mock().await;
    let mut presentation = presentation_for(&server, Duration::from_secs(60));
    let mut surface = PageSurface::new();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let slow = Duration::from_millis(400);

    presentation.navigate("/");
    terminal
        .draw(|frame| draw(frame, &presentation, &mut surface))
        .unwrap();

    let mut outcomes = Vec::new();
    for step in 0..3 {
        outcomes.extend(advance_frame(&mut presentation, &mut surface, slow));
        if step == 0 {
            presentation.navigate("/vigilum#demo");
        }
        terminal
            .draw(|frame| draw(frame, &presentation, &mut surface))
            .unwrap();
    }

    assert_eq!(outcomes, [ScrollOutcome::Scrolled("demo".into())]);
    assert!(surface.offset() > 0);
}
