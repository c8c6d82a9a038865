//! Input handling for the Vigil TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use vigil_engine::{Presentation, Route};
use vigil_types::{ANALYSIS_PATH, LANDING_PATH, NAV_LINKS, SectionId};

use crate::surface::PageSurface;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and queues them for the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input into the presentation. Returns `true` when the app should quit.
pub fn handle_events(
    presentation: &mut Presentation,
    surface: &mut PageSurface,
    input: &mut InputPump,
) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if let Event::Key(key) = ev {
            apply_key(presentation, surface, key);
        }
        if presentation.should_quit() {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(presentation.should_quit())
}

/// Apply one key press. Releases are ignored.
pub fn apply_key(presentation: &mut Presentation, surface: &mut PageSurface, key: KeyEvent) {
    if matches!(key.kind, KeyEventKind::Release) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        presentation.request_quit();
        return;
    }

    let route = presentation.route();
    match key.code {
        KeyCode::Esc if presentation.menu().is_open() => presentation.toggle_menu(),
        KeyCode::Char('q') | KeyCode::Esc => presentation.request_quit(),
        KeyCode::Char('m') => presentation.toggle_menu(),
        KeyCode::Char('h') => {
            presentation.navigate(LANDING_PATH);
        }
        KeyCode::Char('a') => {
            presentation.navigate(ANALYSIS_PATH);
        }
        KeyCode::Enter if route == Some(Route::Landing) => {
            presentation.navigate_to(SectionId::Demo.location());
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = usize::from(c as u8 - b'1');
            if let Some(link) = NAV_LINKS.get(index) {
                debug!(section = link.section.anchor(), "Menu navigation");
                presentation.navigate_to(link.section.location());
            }
        }
        KeyCode::Up if route == Some(Route::Analysis) => {
            presentation.select_previous_case();
        }
        KeyCode::Down if route == Some(Route::Analysis) => {
            presentation.select_next_case();
        }
        KeyCode::Char('k') => surface.scroll_by(-1),
        KeyCode::Char('j') => surface.scroll_by(1),
        KeyCode::PageUp => surface.scroll_by(-i32::from(surface.viewport_height().max(1))),
        KeyCode::PageDown => surface.scroll_by(i32::from(surface.viewport_height().max(1))),
        KeyCode::Char('g') | KeyCode::Home => surface.scroll_to_top(),
        _ => {}
    }
}
