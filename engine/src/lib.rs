//! Presentation engine for Vigil - state machines and orchestration.
//!
//! This crate owns the behavior of the site without any terminal dependencies:
//! the phase ticker, the deferred status probe, case-study selection and
//! hash-anchored scrolling. [`Presentation`] composes them behind the router
//! seam; a host drives it with [`Presentation::navigate`] and
//! [`Presentation::tick`] and renders from its read accessors.

use std::time::Duration;

use url::Url;

pub use vigil_probe::{DEFAULT_PROBE_TIMEOUT, HealthPingClient};
pub use vigil_types::{
    CaseCatalog, CaseRecord, Location, MenuState, PhaseRecord, PhaseSet, PingState, Route,
    SectionId, clause_phases,
};

mod config;
mod explorer;
mod navigator;
mod rotator;
mod status;

pub use config::{
    ConfigError, DEFAULT_ORIGIN, ORIGIN_ENV, PresentationConfig, Settings, SettingsError,
    StatusConfig, VigilConfig, config_path, expand_env_vars,
};
pub use explorer::{CaseEntry, CaseStudyExplorer, SelectOutcome};
pub use navigator::{
    DEFAULT_SCROLL_DELAY, HashAnchoredNavigator, RenderSurface, ScrollAlign, ScrollBehavior,
    ScrollOutcome, ScrollRequest,
};
pub use rotator::{DEFAULT_PHASE_INTERVAL, PhaseCursor, PhaseRotator};
pub use status::{DEFAULT_INITIAL_DELAY, StatusIndicator};

// ============================================================================
// ProbeTarget - where and how the landing view probes
// ============================================================================

/// Everything needed to schedule a landing-view status probe.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub client: HealthPingClient,
    pub endpoint: Url,
    pub initial_delay: Duration,
    pub timeout: Duration,
}

impl ProbeTarget {
    /// Target with the default client, delay and timeout.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: HealthPingClient::new(),
            endpoint,
            initial_delay: DEFAULT_INITIAL_DELAY,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    fn spawn(&self) -> StatusIndicator {
        StatusIndicator::spawn(
            self.client.clone(),
            self.endpoint.clone(),
            self.initial_delay,
            self.timeout,
        )
    }
}

// ============================================================================
// LandingView - per-mount resources
// ============================================================================

/// Timers owned by a mounted landing view. Dropping it stops both.
#[derive(Debug)]
struct LandingView {
    rotator: PhaseRotator,
    status: StatusIndicator,
}

// ============================================================================
// Presentation
// ============================================================================

/// The presentation state machine.
///
/// Route changes drive resource lifetimes: the landing view's rotator and
/// status probe exist only while the landing route is active, and a pending
/// anchored scroll is discarded when the analysis route is left.
#[derive(Debug)]
pub struct Presentation {
    phases: PhaseSet,
    phase_interval: Duration,
    probe: ProbeTarget,
    landing: Option<LandingView>,
    explorer: CaseStudyExplorer,
    navigator: HashAnchoredNavigator,
    location: Option<Location>,
    menu: MenuState,
    should_quit: bool,
}

impl Presentation {
    #[must_use]
    pub fn new(
        catalog: CaseCatalog,
        probe: ProbeTarget,
        phase_interval: Duration,
        scroll_delay: Duration,
    ) -> Self {
        Self {
            phases: clause_phases(),
            phase_interval,
            probe,
            landing: None,
            explorer: CaseStudyExplorer::new(catalog),
            navigator: HashAnchoredNavigator::new(scroll_delay),
            location: None,
            menu: MenuState::Closed,
            should_quit: false,
        }
    }

    /// Build from resolved settings, loading the configured case library.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let catalog = settings.load_cases()?;
        let probe = ProbeTarget {
            client: HealthPingClient::new(),
            endpoint: settings.status_endpoint()?,
            initial_delay: settings.initial_delay,
            timeout: settings.probe_timeout,
        };
        Ok(Self::new(
            catalog,
            probe,
            settings.phase_interval,
            settings.scroll_delay,
        ))
    }

    /// Apply a router location such as `/vigilum#cases`.
    ///
    /// Must be called from within a tokio runtime when the target is the
    /// landing route.
    pub fn navigate(&mut self, raw: &str) -> Route {
        self.navigate_to(Location::parse(raw))
    }

    pub fn navigate_to(&mut self, location: Location) -> Route {
        let route = location.route();
        let previous = self.location.as_ref().map(Location::route);
        self.menu = MenuState::Closed;

        if previous != Some(route) {
            match previous {
                Some(Route::Landing) => self.unmount_landing(),
                Some(Route::Analysis) => self.navigator.cancel(),
                Some(Route::NotFound) | None => {}
            }
            if route == Route::Landing {
                self.mount_landing();
            }
        }

        if route == Route::Analysis {
            self.navigator.on_location_change(&location.hash());
        }

        tracing::debug!(location = %location, route = ?route, "Navigated");
        self.location = Some(location);
        route
    }

    fn mount_landing(&mut self) {
        self.landing = Some(LandingView {
            rotator: PhaseRotator::start(&self.phases, self.phase_interval),
            status: self.probe.spawn(),
        });
    }

    fn unmount_landing(&mut self) {
        if let Some(mut landing) = self.landing.take() {
            landing.rotator.stop();
            landing.status.cancel();
        }
    }

    /// Advance frame-driven timers by `delta`.
    pub fn tick<S>(&mut self, delta: Duration, surface: &mut S) -> Option<ScrollOutcome>
    where
        S: RenderSurface + ?Sized,
    {
        self.navigator.tick(delta, surface)
    }

    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.location.as_ref().map(Location::route)
    }

    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn phases(&self) -> &PhaseSet {
        &self.phases
    }

    /// Active phase index while the landing view is mounted.
    #[must_use]
    pub fn current_phase(&self) -> Option<usize> {
        self.landing.as_ref().map(|l| l.rotator.current())
    }

    #[must_use]
    pub fn status(&self) -> Option<PingState> {
        self.landing.as_ref().map(|l| l.status.state())
    }

    /// Status line while the landing view is mounted.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        self.landing.as_ref().map(|l| l.status.text())
    }

    #[must_use]
    pub fn explorer(&self) -> &CaseStudyExplorer {
        &self.explorer
    }

    pub fn select_case(&mut self, index: usize) -> SelectOutcome {
        self.explorer.select(index)
    }

    pub fn select_next_case(&mut self) -> SelectOutcome {
        self.explorer.select_next()
    }

    pub fn select_previous_case(&mut self) -> SelectOutcome {
        self.explorer.select_previous()
    }

    #[must_use]
    pub fn pending_scroll(&self) -> Option<&str> {
        self.navigator.pending_target()
    }

    #[must_use]
    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn toggle_menu(&mut self) {
        self.menu = self.menu.toggle();
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests;
