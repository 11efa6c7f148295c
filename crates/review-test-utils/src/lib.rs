//! Testing utilities for the review workspace
//!
//! Shared fixtures: sessions on a manual clock, clock driving, canned inputs.

#![allow(missing_docs)]

use review_kernel::config::ReviewConfig;
use review_kernel::navigation::RecordingNavigator;
use review_kernel::scheduler::ManualScheduler;
use review_kernel::session::ReviewSession;
use std::sync::Arc;
use std::time::Duration;

pub const JUSTIFICATION: &str = "Employee confirmed legal name change";

pub const TRANSITION_DELAY: Duration = Duration::from_millis(800);
pub const NOTIFICATION_VISIBLE: Duration = Duration::from_millis(5000);
pub const NOTIFICATION_EXIT: Duration = Duration::from_millis(200);

/// Session wired to a manual clock and a recording navigator.
pub struct Harness {
    pub clock: Arc<ManualScheduler>,
    pub navigator: RecordingNavigator,
    pub session: ReviewSession,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&test_config())
    }

    pub fn with_config(config: &ReviewConfig) -> Self {
        let clock = Arc::new(ManualScheduler::new());
        let navigator = RecordingNavigator::new();
        let session = ReviewSession::new(config, clock.clone(), Box::new(navigator.clone()));
        Self {
            clock,
            navigator,
            session,
        }
    }

    /// Advance the simulated clock, delivering due timers to the session.
    pub fn advance(&mut self, by: Duration) -> usize {
        let session = &mut self.session;
        self.clock.advance(by, |fired| session.on_timer(fired))
    }

    /// Advance past the transition delay.
    pub fn settle_transition(&mut self) -> usize {
        self.advance(TRANSITION_DELAY)
    }

    /// Open the dialog, type `text`, confirm.
    pub fn override_with(&mut self, text: &str) -> review_kernel::Outcome {
        self.session.open_override_modal();
        self.session.set_justification(text);
        self.session.confirm_override()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_config() -> ReviewConfig {
    ReviewConfig::default()
        .with_transition_delay(TRANSITION_DELAY)
        .with_notification_timing(NOTIFICATION_VISIBLE, NOTIFICATION_EXIT)
}

pub fn harness() -> Harness {
    Harness::new()
}
