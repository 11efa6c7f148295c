//! Scheduler Module
//!
//! Deferred callbacks are modelled as data: a [`Scheduler`] accepts a
//! [`TimerKind`] with a delay and hands back a [`TimerHandle`]. When the delay
//! elapses the host receives a [`FiredTimer`] and passes it to
//! [`crate::session::ReviewSession::on_timer`]. Keeping the callback out of the
//! scheduler keeps the session single-owner and lets tests substitute
//! [`ManualScheduler`] for the real clock.
//!
//! Outstanding timers are held through [`TimerGuard`], which cancels on drop.

pub mod runtime;

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use runtime::TokioScheduler;

/// Opaque id of a scheduled timer. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Move a transient status to its settled counterpart.
    AutoAdvance,
    /// Visible duration of a notification is over, begin its exit.
    NotificationExit,
    /// Exit grace period is over, remove the notification.
    NotificationRemove,
}

/// A timer whose delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    /// Handle returned by `schedule`
    pub handle: TimerHandle,
    /// Scheduled action
    pub kind: TimerKind,
}

/// Clock abstraction consumed by the session.
pub trait Scheduler: Send + Sync + fmt::Debug {
    /// Arrange for `kind` to fire after `delay`.
    fn schedule(&self, delay: Duration, kind: TimerKind) -> TimerHandle;

    /// Cancel a timer. Unknown or already fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

/// Scoped ownership of one outstanding timer.
///
/// Dropping the guard cancels the timer; cancelling a timer that already
/// fired is a no-op on every scheduler.
pub struct TimerGuard {
    handle: TimerHandle,
    kind: TimerKind,
    scheduler: Arc<dyn Scheduler>,
}

impl TimerGuard {
    /// Schedule `kind` on `scheduler` and hold the handle.
    pub fn schedule(scheduler: &Arc<dyn Scheduler>, delay: Duration, kind: TimerKind) -> Self {
        let handle = scheduler.schedule(delay, kind);
        tracing::trace!(%handle, ?kind, ?delay, "timer scheduled");
        Self {
            handle,
            kind,
            scheduler: Arc::clone(scheduler),
        }
    }

    /// Handle of the held timer.
    #[must_use]
    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    /// Kind of the held timer.
    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// True if `fired` is the timer held by this guard.
    #[must_use]
    pub fn matches(&self, fired: &FiredTimer) -> bool {
        self.handle == fired.handle && self.kind == fired.kind
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        tracing::trace!(handle = %self.handle, kind = ?self.kind, "timer released");
        self.scheduler.cancel(self.handle);
    }
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Deterministic scheduler driven by explicit clock advances.
///
/// Time starts at zero and only moves through [`ManualScheduler::pop_due`]
/// and [`ManualScheduler::set_now`]. Timers fire in deadline order; ties
/// fire in scheduling order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    inner: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_handle: u64,
    // keyed by (deadline, handle) so iteration order is firing order
    pending: BTreeMap<(Duration, TimerHandle), TimerKind>,
}

impl ManualScheduler {
    /// Scheduler at time zero with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Kinds of the outstanding timers, in firing order.
    #[must_use]
    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        self.inner.lock().pending.values().copied().collect()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&self, until: Duration) -> Option<FiredTimer> {
        let mut state = self.inner.lock();
        let (&(deadline, handle), _) = state.pending.iter().next()?;
        if deadline > until {
            return None;
        }
        let kind = state.pending.remove(&(deadline, handle))?;
        state.now = state.now.max(deadline);
        Some(FiredTimer { handle, kind })
    }

    /// Advance the clock by `by`, handing every timer that comes due to
    /// `deliver` in firing order. Timers scheduled by `deliver` fire too if
    /// their deadline falls inside the window. Returns how many fired.
    pub fn advance(&self, by: Duration, mut deliver: impl FnMut(FiredTimer)) -> usize {
        let target = self.now() + by;
        let mut fired = 0;
        while let Some(timer) = self.pop_due(target) {
            deliver(timer);
            fired += 1;
        }
        self.set_now(target);
        fired
    }

    /// Move the clock forward to `at` without firing anything.
    /// Moving backwards is ignored.
    pub fn set_now(&self, at: Duration) {
        let mut state = self.inner.lock();
        state.now = state.now.max(at);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, kind: TimerKind) -> TimerHandle {
        let mut state = self.inner.lock();
        state.next_handle += 1;
        let handle = TimerHandle(state.next_handle);
        let deadline = state.now + delay;
        state.pending.insert((deadline, handle), kind);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner.lock().pending.retain(|&(_, h), _| h != handle);
    }
}
