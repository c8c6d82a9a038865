//! Vigil CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`vigil_engine`] (presentation state) and [`vigil_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed cleanup.
//!
//! ```text
//! main() -> Settings::resolve() -> TerminalSession::new() -> run_app() -> Presentation + TUI
//!        \-> probe subcommand -> HealthPingClient::probe() -> exit code
//! ```
//!
//! # Event Loop
//!
//! A fixed 16ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Advance frame-driven timers ([`vigil_tui::advance_frame`]: scroll deferral, smooth scrolling)
//! 3. Drain input queue (non-blocking via [`vigil_tui::InputPump`])
//! 4. Render frame

mod args;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
    time::Duration,
};
use tokio::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vigil_engine::{HealthPingClient, Presentation, Settings, VigilConfig};
use vigil_tui::{InputPump, PageSurface, advance_frame, draw, handle_events};

use crate::args::{Command, USAGE};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_vigil_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_vigil_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let candidates = vigil_log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn vigil_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.vigil/logs/vigil.log
    if let Some(config_path) = VigilConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("vigil.log"));
    }

    // Fallback: ./.vigil/logs/vigil.log
    candidates.push(PathBuf::from(".vigil").join("logs").join("vigil.log"));

    candidates
}

fn load_settings() -> Settings {
    let config = match VigilConfig::load() {
        Ok(config) => config,
        Err(err) => {
            // Already logged with details; run on defaults.
            tracing::warn!(path = %err.path().display(), "Ignoring unusable config");
            None
        }
    };
    Settings::resolve(config.as_ref())
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode and the alternate screen; on drop both are restored, so the
/// terminal remains usable even after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let command = match args::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("vigil {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Probe { origin } => run_probe(origin).await,
        Command::Run { location } => run(&location).await.map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_probe(origin: Option<String>) -> Result<ExitCode> {
    let mut settings = load_settings();
    if let Some(origin) = origin {
        settings.origin = origin;
    }
    let endpoint = settings
        .status_endpoint()
        .context("invalid status endpoint")?;

    let state = HealthPingClient::new()
        .probe(&endpoint, settings.probe_timeout)
        .await;
    println!("{}", state.display_text());

    Ok(if state.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(location: &str) -> Result<()> {
    let settings = load_settings();
    tracing::info!(
        origin = %settings.origin,
        phase_interval_ms = settings.phase_interval.as_millis(),
        "Starting presentation"
    );
    let mut presentation =
        Presentation::from_settings(&settings).context("failed to load settings")?;

    let mut session = TerminalSession::new()?;
    presentation.navigate(location);
    run_app(&mut session.terminal, &mut presentation).await
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_app<B>(terminal: &mut Terminal<B>, presentation: &mut Presentation) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut surface = PageSurface::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_frame = Instant::now();

    let result: Result<()> = loop {
        frames.tick().await;
        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;

        // Timers first: a navigation handled below gets its page drawn
        // before its deferral is charged any time.
        advance_frame(presentation, &mut surface, delta);

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(presentation, &mut surface, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, presentation, &mut surface)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
