//! Review session
//!
//! [`ReviewSession`] is the single owner of everything the review flow
//! mutates: task status, the removed flag, the activity log, the override
//! modal, the justification draft and the notification slot. Hosts create
//! one per session, call its operations in response to administrator input,
//! and forward fired timers to [`ReviewSession::on_timer`].
//!
//! Every status-changing operation appends its activity entry before the
//! status changes, and rejected operations leave every field untouched.
//! At most one transition timer is outstanding; it is held through a
//! [`TimerGuard`], so resetting the task, leaving the review view or
//! dropping the session cancels it.

use crate::activity::{ActivityEntry, ActivityLog, Timestamper};
use crate::config::ReviewConfig;
use crate::demo::{CaseFile, QueueItem};
use crate::error::{Outcome, TransitionError};
use crate::navigation::{Destination, Navigator};
use crate::notification::{Notification, NotificationCoordinator};
use crate::scheduler::{FiredTimer, Scheduler, TimerGuard, TimerKind};
use crate::state_machine;
use crate::types::{
    Badge, EntryId, ReviewPane, SessionId, TaskEvent, TaskStatus, View,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// The review task. Exactly one exists per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Current status
    pub status: TaskStatus,
    /// Archived out of the active queue
    pub removed: bool,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            status: TaskStatus::PendingReview,
            removed: false,
        }
    }
}

/// Transient override reason buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JustificationDraft(String);

impl JustificationDraft {
    /// Raw text as typed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Trimmed text, `None` when blank.
    #[must_use]
    pub fn submittable(&self) -> Option<&str> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Current status
    pub status: TaskStatus,
    /// Archived flag
    pub removed: bool,
    /// Badge for the status
    pub badge: Badge,
    /// Header title for the status
    pub header: &'static str,
    /// Main review pane for the status
    pub pane: ReviewPane,
    /// Current top-level view
    pub view: View,
    /// Override modal open
    pub modal_open: bool,
    /// Justification draft text
    pub justification_draft: String,
    /// Whether the override can be confirmed right now
    pub can_confirm_override: bool,
    /// Current notification
    pub notification: Option<Notification>,
    /// Activity log, newest first
    pub activity_log: Vec<ActivityEntry>,
    /// Reference shown on the completed pane
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_reference: Option<String>,
}

/// Injectable state container for one review session.
#[derive(Debug)]
pub struct ReviewSession {
    id: SessionId,
    task: Task,
    log: ActivityLog,
    draft: JustificationDraft,
    modal_open: bool,
    view: View,
    notifications: NotificationCoordinator,
    transition_timer: Option<TimerGuard>,
    scheduler: Arc<dyn Scheduler>,
    navigator: Box<dyn Navigator>,
    transition_delay: Duration,
    timestamper: Timestamper,
    case: CaseFile,
    next_entry_seq: u64,
}

impl ReviewSession {
    /// New session in `pending_review` with the seeded log, on the queue view.
    pub fn new(
        config: &ReviewConfig,
        scheduler: Arc<dyn Scheduler>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let log = ActivityLog::seeded();
        let next_entry_seq = log.len() as u64 + 1;
        let id = SessionId::new();
        tracing::info!(session = %id, "review session started");
        Self {
            id,
            task: Task::default(),
            log,
            draft: JustificationDraft::default(),
            modal_open: false,
            view: View::Queue,
            notifications: NotificationCoordinator::new(
                Arc::clone(&scheduler),
                config.notification_visible(),
                config.notification_exit(),
            ),
            transition_timer: None,
            scheduler,
            navigator,
            transition_delay: config.transition_delay(),
            timestamper: config.timestamp.clone(),
            case: CaseFile::standard(),
            next_entry_seq,
        }
    }

    // ---- read access -------------------------------------------------

    /// Session id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.task.status
    }

    /// Archived flag.
    #[must_use]
    pub fn removed(&self) -> bool {
        self.task.removed
    }

    /// Activity log, newest first.
    #[must_use]
    pub fn activity_log(&self) -> &ActivityLog {
        &self.log
    }

    /// Justification draft.
    #[must_use]
    pub fn justification_draft(&self) -> &JustificationDraft {
        &self.draft
    }

    /// Current notification.
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Override modal visibility.
    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Current top-level view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// True while an auto-advance is outstanding.
    #[must_use]
    pub fn transition_pending(&self) -> bool {
        self.transition_timer.is_some()
    }

    /// Case under review.
    #[must_use]
    pub fn case(&self) -> &CaseFile {
        &self.case
    }

    /// Pending task queue: the case unless it was archived.
    #[must_use]
    pub fn queue(&self) -> Vec<QueueItem> {
        if self.task.removed {
            Vec::new()
        } else {
            vec![QueueItem::for_case(&self.case)]
        }
    }

    /// True when confirming the override would be accepted.
    #[must_use]
    pub fn can_confirm_override(&self) -> bool {
        state_machine::validate_transition(self.task.status, TaskEvent::ConfirmOverride).is_ok()
            && self.draft.submittable().is_some()
    }

    /// Everything the presentation layer renders.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.task.status,
            removed: self.task.removed,
            badge: self.task.status.badge(),
            header: self.task.status.header_title(),
            pane: self.task.status.pane(),
            view: self.view,
            modal_open: self.modal_open,
            justification_draft: self.draft.text().to_string(),
            can_confirm_override: self.can_confirm_override(),
            notification: self.notifications.current().cloned(),
            activity_log: self.log.entries().to_vec(),
            override_reference: (self.task.status.pane() == ReviewPane::Completed)
                .then(|| self.case.override_reference.clone()),
        }
    }

    // ---- administrator actions --------------------------------------

    /// Ask the employee to resubmit.
    pub fn request_correction(&mut self) -> Outcome {
        let event = TaskEvent::RequestCorrection;
        let to = match state_machine::next_status(self.task.status, event) {
            Ok(to) => to,
            Err(reason) => return self.ignore(event, reason),
        };

        let entry = ActivityEntry::correction_requested(
            self.next_entry_id("correction"),
            self.timestamper.stamp(),
        );
        self.record(entry);
        self.advance(event, to);
        self.arm_transition_timer();
        self.notifications.show(Notification::correction_sent());
        Outcome::Applied
    }

    /// Open the override confirmation dialog.
    pub fn open_override_modal(&mut self) -> Outcome {
        self.modal_open = true;
        Outcome::Applied
    }

    /// Close the override dialog and discard the draft.
    pub fn cancel_override_modal(&mut self) -> Outcome {
        self.modal_open = false;
        self.draft.clear();
        Outcome::Applied
    }

    /// Replace the justification draft with `text`.
    pub fn set_justification(&mut self, text: impl Into<String>) {
        self.draft.set(text);
    }

    /// Approve despite the mismatch, using the current draft as justification.
    pub fn confirm_override(&mut self) -> Outcome {
        let event = TaskEvent::ConfirmOverride;
        let to = match state_machine::next_status(self.task.status, event) {
            Ok(to) => to,
            Err(reason) => return self.ignore(event, reason),
        };
        let Some(justification) = self.draft.submittable().map(str::to_string) else {
            return self.ignore(event, TransitionError::EmptyJustification);
        };

        let entry = ActivityEntry::override_approved(
            self.next_entry_id("override"),
            self.timestamper.stamp(),
            &justification,
        );
        self.record(entry);
        self.modal_open = false;
        self.draft.clear();
        self.advance(event, to);
        self.arm_transition_timer();
        self.notifications.show(Notification::document_approved());
        Outcome::Applied
    }

    /// Archive the task, reset the log and go back to the queue.
    pub fn return_to_queue(&mut self) -> Outcome {
        let event = TaskEvent::ReturnToQueue;
        let to = match state_machine::next_status(self.task.status, event) {
            Ok(to) => to,
            Err(reason) => return self.ignore(event, reason),
        };

        self.transition_timer = None;
        self.task.removed = true;
        self.advance(event, to);
        self.log.reset();
        self.draft.clear();
        self.modal_open = false;
        self.navigate(Destination::Queue);
        Outcome::Applied
    }

    /// Put the task back in the queue in its initial state.
    pub fn restore_demo(&mut self) -> Outcome {
        let event = TaskEvent::RestoreDemo;
        let to = match state_machine::next_status(self.task.status, event) {
            Ok(to) => to,
            Err(reason) => return self.ignore(event, reason),
        };

        self.transition_timer = None;
        self.notifications.clear();
        self.task = Task {
            status: to,
            removed: false,
        };
        tracing::info!(session = %self.id, ?event, to = %to, "demo restored");
        self.log.reset();
        self.draft.clear();
        self.modal_open = false;
        Outcome::Applied
    }

    /// Dismiss the current notification. Idempotent.
    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    // ---- view lifecycle ---------------------------------------------

    /// Enter the review view. Re-arms the auto-advance of a transient status.
    pub fn open_review(&mut self) -> Outcome {
        if self.task.removed {
            tracing::debug!(session = %self.id, "review of removed task ignored");
            return Outcome::Ignored(TransitionError::TaskRemoved);
        }
        if self.task.status.is_transient() && self.transition_timer.is_none() {
            self.arm_transition_timer();
        }
        self.navigate(Destination::Review);
        Outcome::Applied
    }

    /// Leave the review view without resetting anything.
    ///
    /// The outstanding auto-advance is cancelled; a transient status stays
    /// transient until the view is opened again.
    pub fn leave_review(&mut self) -> Outcome {
        if let Some(timer) = self.transition_timer.take() {
            tracing::debug!(
                session = %self.id,
                handle = %timer.handle(),
                kind = ?timer.kind(),
                status = %self.task.status,
                "auto-advance cancelled on exit"
            );
        }
        self.modal_open = false;
        self.navigate(Destination::Queue);
        Outcome::Applied
    }

    // ---- timers -----------------------------------------------------

    /// Deliver a fired timer. Timers the session no longer holds are ignored.
    pub fn on_timer(&mut self, fired: FiredTimer) {
        match fired.kind {
            TimerKind::AutoAdvance => self.on_auto_advance(&fired),
            TimerKind::NotificationExit | TimerKind::NotificationRemove => {
                if !self.notifications.on_timer(&fired) {
                    tracing::debug!(session = %self.id, handle = %fired.handle, "stale notification timer");
                }
            }
        }
    }

    fn on_auto_advance(&mut self, fired: &FiredTimer) {
        if !self.transition_timer.as_ref().is_some_and(|t| t.matches(fired)) {
            tracing::debug!(session = %self.id, handle = %fired.handle, "stale transition timer");
            return;
        }
        self.transition_timer = None;

        let event = TaskEvent::TimerElapsed;
        match state_machine::next_status(self.task.status, event) {
            Ok(to) => self.advance(event, to),
            Err(reason) => {
                self.ignore(event, reason);
            }
        }
    }

    // ---- internals --------------------------------------------------

    fn arm_transition_timer(&mut self) {
        self.transition_timer = Some(TimerGuard::schedule(
            &self.scheduler,
            self.transition_delay,
            TimerKind::AutoAdvance,
        ));
    }

    fn record(&mut self, entry: ActivityEntry) {
        self.log.prepend(entry);
        if let Some(newest) = self.log.newest() {
            tracing::debug!(session = %self.id, entry = %newest.id, kind = ?newest.kind, "activity recorded");
        }
    }

    fn advance(&mut self, event: TaskEvent, to: TaskStatus) {
        let from = self.task.status;
        self.task.status = to;
        tracing::info!(session = %self.id, ?event, from = %from, to = %to, "task transition");
    }

    fn ignore(&self, event: TaskEvent, reason: TransitionError) -> Outcome {
        tracing::debug!(session = %self.id, ?event, status = %self.task.status, %reason, "event ignored");
        Outcome::Ignored(reason)
    }

    fn navigate(&mut self, destination: Destination) {
        self.view = match destination {
            Destination::Queue => View::Queue,
            Destination::Review => View::Review,
        };
        self.navigator.go_to(destination);
    }

    fn next_entry_id(&mut self, prefix: &str) -> EntryId {
        let id = EntryId::sequenced(prefix, self.next_entry_seq);
        self.next_entry_seq += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::scheduler::ManualScheduler;

    fn session() -> (Arc<ManualScheduler>, ReviewSession) {
        let clock = Arc::new(ManualScheduler::new());
        let session = ReviewSession::new(
            &ReviewConfig::default(),
            clock.clone(),
            Box::new(RecordingNavigator::new()),
        );
        (clock, session)
    }

    #[test]
    fn starts_in_pending_review() {
        let (_, session) = session();
        assert_eq!(session.status(), TaskStatus::PendingReview);
        assert!(!session.removed());
        assert!(session.activity_log().is_seed());
        assert_eq!(session.view(), View::Queue);
        assert_eq!(session.queue().len(), 1);
    }

    #[test]
    fn draft_trims_for_submission() {
        let mut draft = JustificationDraft::default();
        draft.set("  reason \n");
        assert_eq!(draft.submittable(), Some("reason"));
        draft.set(" \t ");
        assert_eq!(draft.submittable(), None);
    }

    #[test]
    fn entry_ids_continue_after_seed() {
        let (_, mut session) = session();
        session.request_correction();
        assert_eq!(session.activity_log()[0].id.as_str(), "correction-4");
    }

    #[test]
    fn dropping_session_cancels_timers() {
        let (clock, mut session) = session();
        session.request_correction();
        assert_eq!(clock.pending(), 2);
        drop(session);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn can_confirm_tracks_draft_and_status() {
        let (_, mut session) = session();
        assert!(!session.can_confirm_override());
        session.set_justification("Legal name change");
        assert!(session.can_confirm_override());
        session.request_correction();
        assert!(!session.can_confirm_override());
    }
}
