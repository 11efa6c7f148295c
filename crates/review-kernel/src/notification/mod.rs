//! Toast notifications
//!
//! At most one notification is visible. Showing a new one replaces the
//! current one and its timers. A shown notification goes through two timed
//! phases: it stays [`NotificationPhase::Visible`] for the visible duration,
//! then [`NotificationPhase::Exiting`] for the exit grace period, then it is
//! removed. Manual dismissal skips straight to the exit phase.

use crate::scheduler::{FiredTimer, Scheduler, TimerGuard, TimerKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Visual tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTone {
    /// Green confirmation style
    Success,
    /// Plain white style
    Neutral,
}

/// Lifecycle phase of the current notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    /// Fully shown
    Visible,
    /// Exit transition running
    Exiting,
}

/// A notification request from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline
    pub message: String,
    /// Secondary line
    pub description: String,
    /// Style
    pub tone: NotificationTone,
    /// Current phase
    pub phase: NotificationPhase,
}

impl Notification {
    /// Sent after a correction request.
    #[must_use]
    pub fn correction_sent() -> Self {
        Self::visible(
            "Correction request sent to employee",
            "The employee will be notified to resubmit their document.",
            NotificationTone::Success,
        )
    }

    /// Sent after an override approval.
    #[must_use]
    pub fn document_approved() -> Self {
        Self::visible(
            "Document approved",
            "The document has been approved and the employee record updated.",
            NotificationTone::Neutral,
        )
    }

    fn visible(message: &str, description: &str, tone: NotificationTone) -> Self {
        Self {
            message: message.to_string(),
            description: description.to_string(),
            tone,
            phase: NotificationPhase::Visible,
        }
    }
}

/// Owns the single notification slot and its timers.
#[derive(Debug)]
pub struct NotificationCoordinator {
    current: Option<Notification>,
    timer: Option<TimerGuard>,
    scheduler: Arc<dyn Scheduler>,
    visible_for: Duration,
    exit_for: Duration,
}

impl NotificationCoordinator {
    /// Empty coordinator.
    pub fn new(scheduler: Arc<dyn Scheduler>, visible_for: Duration, exit_for: Duration) -> Self {
        Self {
            current: None,
            timer: None,
            scheduler,
            visible_for,
            exit_for,
        }
    }

    /// Current notification, visible or exiting.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// True while a notification is fully visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(
            self.current,
            Some(Notification {
                phase: NotificationPhase::Visible,
                ..
            })
        )
    }

    /// Show `notification`, replacing whatever is current.
    pub fn show(&mut self, mut notification: Notification) {
        notification.phase = NotificationPhase::Visible;
        tracing::debug!(message = %notification.message, "notification shown");
        self.current = Some(notification);
        // assigning drops and cancels the previous guard
        self.timer = Some(TimerGuard::schedule(
            &self.scheduler,
            self.visible_for,
            TimerKind::NotificationExit,
        ));
    }

    /// Begin the exit phase now. No-op unless a notification is visible.
    pub fn dismiss(&mut self) {
        if !self.is_visible() {
            return;
        }
        tracing::debug!("notification dismissed");
        self.begin_exit();
    }

    /// Drop the notification and its timers immediately.
    pub fn clear(&mut self) {
        self.timer = None;
        self.current = None;
    }

    /// Handle a fired notification timer. Returns false for timers this
    /// coordinator does not hold.
    pub fn on_timer(&mut self, fired: &FiredTimer) -> bool {
        if !self.timer.as_ref().is_some_and(|t| t.matches(fired)) {
            return false;
        }
        match fired.kind {
            TimerKind::NotificationExit => self.begin_exit(),
            TimerKind::NotificationRemove => {
                tracing::debug!("notification removed");
                self.clear();
            }
            TimerKind::AutoAdvance => return false,
        }
        true
    }

    fn begin_exit(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.phase = NotificationPhase::Exiting;
        }
        self.timer = Some(TimerGuard::schedule(
            &self.scheduler,
            self.exit_for,
            TimerKind::NotificationRemove,
        ));
    }
}
