//! Hash-anchored scroll navigation.
//!
//! The router reports a new fragment; the target section may not be rendered
//! yet, so the lookup and scroll are deferred by a short fixed delay. The
//! deferral is advanced by the host frame loop through
//! [`HashAnchoredNavigator::tick`] and lives inside the navigator, so dropping
//! or cancelling the navigator discards it.

use std::time::Duration;

/// Default deferral between a location change and the scroll request.
pub const DEFAULT_SCROLL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Which edge of the target lines up with the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub behavior: ScrollBehavior,
    pub align: ScrollAlign,
}

impl ScrollRequest {
    pub const SMOOTH_START: Self = Self {
        behavior: ScrollBehavior::Smooth,
        align: ScrollAlign::Start,
    };
}

/// The document view the navigator scrolls.
pub trait RenderSurface {
    /// Whether a section with this identifier is currently rendered.
    fn contains_target(&self, id: &str) -> bool;

    fn scroll_into_view(&mut self, id: &str, request: ScrollRequest);
}

/// What happened when a deferral completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollOutcome {
    Scrolled(String),
    MissingTarget(String),
}

#[derive(Debug, Clone)]
struct Deferral {
    elapsed: Duration,
    duration: Duration,
}

impl Deferral {
    fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone)]
struct PendingScroll {
    target: String,
    deferral: Deferral,
}

#[derive(Debug, Clone)]
pub struct HashAnchoredNavigator {
    delay: Duration,
    pending: Option<PendingScroll>,
}

impl Default for HashAnchoredNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_DELAY)
    }
}

impl HashAnchoredNavigator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// React to a new hash fragment (`"#demo"`).
    ///
    /// Empty fragments are ignored. Otherwise any earlier pending scroll is
    /// replaced and the deferral restarts.
    pub fn on_location_change(&mut self, hash: &str) {
        let target = hash.strip_prefix('#').unwrap_or(hash);
        if target.is_empty() {
            return;
        }

        if let Some(previous) = self.pending.as_ref()
            && previous.target != target
        {
            tracing::debug!(
                previous = %previous.target,
                target,
                "Replacing pending scroll"
            );
        }

        self.pending = Some(PendingScroll {
            target: target.to_owned(),
            deferral: Deferral::new(self.delay),
        });
    }

    /// Advance the pending deferral by `delta`. When it completes, look the
    /// target up on `surface` and request the scroll if it exists.
    pub fn tick<S>(&mut self, delta: Duration, surface: &mut S) -> Option<ScrollOutcome>
    where
        S: RenderSurface + ?Sized,
    {
        let pending = self.pending.as_mut()?;
        pending.deferral.advance(delta);
        if !pending.deferral.is_finished() {
            return None;
        }

        let PendingScroll { target, .. } = self.pending.take()?;
        if surface.contains_target(&target) {
            tracing::debug!(target = %target, "Scrolling section into view");
            surface.scroll_into_view(&target, ScrollRequest::SMOOTH_START);
            Some(ScrollOutcome::Scrolled(target))
        } else {
            tracing::debug!(target = %target, "Scroll target not rendered; ignoring");
            Some(ScrollOutcome::MissingTarget(target))
        }
    }

    /// Discard any pending scroll.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending_target(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.target.as_str())
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
