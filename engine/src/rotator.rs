//! Phase rotation ticker.

use std::num::NonZeroUsize;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable, Aborted};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use vigil_types::PhaseSet;

/// Default time each phase stays active.
pub const DEFAULT_PHASE_INTERVAL: Duration = Duration::from_secs(3);

const MIN_PHASE_INTERVAL: Duration = Duration::from_millis(1);

/// Cyclic position within a fixed number of phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCursor {
    current: usize,
    len: NonZeroUsize,
}

impl PhaseCursor {
    #[must_use]
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { current: 0, len }
    }

    #[must_use]
    pub fn for_phases(phases: &PhaseSet) -> Self {
        // PhaseSet is never empty.
        Self::new(NonZeroUsize::new(phases.len()).unwrap_or(NonZeroUsize::MIN))
    }

    /// Step to the next phase, wrapping after the last. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.len.get();
        self.current
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len.get()
    }
}

/// Running phase ticker.
///
/// Ticks once per interval, the first one interval after [`PhaseRotator::start`].
/// Late ticks are delivered in a burst rather than skipped. The ticker task is
/// aborted by [`PhaseRotator::stop`] or when the rotator is dropped.
#[derive(Debug)]
pub struct PhaseRotator {
    phase: watch::Receiver<usize>,
    abort_handle: AbortHandle,
    task: JoinHandle<Result<(), Aborted>>,
    stopped_at: Option<usize>,
}

impl PhaseRotator {
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(phases: &PhaseSet, interval: Duration) -> Self {
        let period = if interval.is_zero() {
            tracing::warn!("Phase interval of zero is not supported; using 1ms");
            MIN_PHASE_INTERVAL
        } else {
            interval
        };

        let mut cursor = PhaseCursor::for_phases(phases);
        let (tx, rx) = watch::channel(cursor.current());
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        let first_tick = Instant::now() + period;
        let ticker = async move {
            let mut ticks = tokio::time::interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticks.tick().await;
                let phase = cursor.advance();
                tracing::trace!(phase, "Phase tick");
                if tx.send(phase).is_err() {
                    break;
                }
            }
        };
        let task = tokio::spawn(Abortable::new(ticker, abort_registration));

        tracing::debug!(
            phases = phases.len(),
            interval_ms = period.as_millis(),
            "Phase rotator started"
        );

        Self {
            phase: rx,
            abort_handle,
            task,
            stopped_at: None,
        }
    }

    /// Index of the active phase. Frozen once the rotator is stopped.
    #[must_use]
    pub fn current(&self) -> usize {
        self.stopped_at.unwrap_or_else(|| *self.phase.borrow())
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.stopped_at.is_some() {
            return;
        }
        self.stopped_at = Some(*self.phase.borrow());
        self.abort_handle.abort();
        tracing::debug!(phase = self.current(), "Phase rotator stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.stopped_at.is_none() && !self.task.is_finished()
    }
}

impl Drop for PhaseRotator {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}
