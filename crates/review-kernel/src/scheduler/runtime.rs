//! Wall-clock scheduler backed by `tokio::time`.
//!
//! Each timer is a spawned task that sleeps and then sends a [`FiredTimer`]
//! over an unbounded channel. The host owns the receiver and forwards
//! deliveries to the session, so all state mutation stays on the host task.
//! A timer cancelled after its message was already queued is filtered by
//! the session, which ignores handles it no longer holds.

use super::{FiredTimer, Scheduler, TimerHandle, TimerKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Scheduler for use inside a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    next_handle: AtomicU64,
    tasks: Arc<Mutex<HashMap<TimerHandle, JoinHandle<()>>>>,
    fired: mpsc::UnboundedSender<FiredTimer>,
}

impl TokioScheduler {
    /// Scheduler plus the receiving end of its fired-timer channel.
    ///
    /// Must be used from within a tokio runtime: `schedule` spawns tasks.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<FiredTimer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Arc::new(Self {
            next_handle: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
            fired: tx,
        });
        (scheduler, rx)
    }

    /// Timers spawned and not yet fired or cancelled.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        let tasks = Arc::clone(&self.tasks);
        let fired = self.fired.clone();

        // Hold the lock across spawn so the task cannot remove its entry
        // before it is inserted.
        let mut guard = self.tasks.lock();
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tasks.lock().remove(&handle);
            if fired.send(FiredTimer { handle, kind }).is_err() {
                tracing::debug!(%handle, "timer fired after receiver dropped");
            }
        });
        guard.insert(handle, join);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(join) = self.tasks.lock().remove(&handle) {
            join.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks.lock().drain() {
            join.abort();
        }
    }
}
