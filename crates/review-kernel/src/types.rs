//! Core vocabulary shared by every module.
//!
//! Status and entry categories are closed enums so that every consumer
//! matches them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one review session in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Fresh random session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of the review task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Flagged document waiting for an administrator decision.
    PendingReview,
    /// Correction requested, auto-advancing to `Pending`.
    PendingTransitionCorrection,
    /// Waiting for the employee to resubmit.
    Pending,
    /// Override confirmed, auto-advancing to `Completed`.
    ApprovedTransition,
    /// Document approved.
    Completed,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::PendingReview,
        TaskStatus::PendingTransitionCorrection,
        TaskStatus::Pending,
        TaskStatus::ApprovedTransition,
        TaskStatus::Completed,
    ];

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::PendingReview => "pending_review",
            TaskStatus::PendingTransitionCorrection => "pending_transition_correction",
            TaskStatus::Pending => "pending",
            TaskStatus::ApprovedTransition => "approved_transition",
            TaskStatus::Completed => "completed",
        }
    }

    /// Transient statuses leave on their own after the transition delay.
    #[must_use]
    pub fn is_transient(self) -> bool {
        self.settles_to().is_some()
    }

    /// Status a transient status advances to when its timer elapses.
    #[must_use]
    pub fn settles_to(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::PendingTransitionCorrection => Some(TaskStatus::Pending),
            TaskStatus::ApprovedTransition => Some(TaskStatus::Completed),
            TaskStatus::PendingReview | TaskStatus::Pending | TaskStatus::Completed => None,
        }
    }

    /// Page header shown above the review.
    #[must_use]
    pub fn header_title(self) -> &'static str {
        match self {
            TaskStatus::Completed => "Task completed",
            TaskStatus::Pending => "Task pending",
            TaskStatus::PendingReview
            | TaskStatus::PendingTransitionCorrection
            | TaskStatus::ApprovedTransition => "Task review",
        }
    }

    /// Badge displayed next to the document title and in the activity sidebar.
    #[must_use]
    pub fn badge(self) -> Badge {
        match self {
            TaskStatus::PendingReview => Badge::PendingReview,
            TaskStatus::PendingTransitionCorrection | TaskStatus::Pending => Badge::Pending,
            TaskStatus::ApprovedTransition | TaskStatus::Completed => Badge::Approved,
        }
    }

    /// Which main pane the review view renders.
    #[must_use]
    pub fn pane(self) -> ReviewPane {
        match self {
            TaskStatus::PendingReview
            | TaskStatus::PendingTransitionCorrection
            | TaskStatus::ApprovedTransition => ReviewPane::Review,
            TaskStatus::Pending => ReviewPane::AwaitingResubmission,
            TaskStatus::Completed => ReviewPane::Completed,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status-changing events understood by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEvent {
    /// Administrator asks the employee to resubmit.
    RequestCorrection,
    /// Administrator approves despite the mismatch.
    ConfirmOverride,
    /// Transition delay elapsed.
    TimerElapsed,
    /// Archive the task and go back to the queue.
    ReturnToQueue,
    /// Put the demo back to its starting point.
    RestoreDemo,
}

impl TaskEvent {
    /// Every event.
    pub const ALL: [TaskEvent; 5] = [
        TaskEvent::RequestCorrection,
        TaskEvent::ConfirmOverride,
        TaskEvent::TimerElapsed,
        TaskEvent::ReturnToQueue,
        TaskEvent::RestoreDemo,
    ];
}

/// Badge label derived from status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    /// `PENDING REVIEW`
    #[serde(rename = "PENDING REVIEW")]
    PendingReview,
    /// `PENDING`
    #[serde(rename = "PENDING")]
    Pending,
    /// `APPROVED`
    #[serde(rename = "APPROVED")]
    Approved,
}

impl Badge {
    /// Upper-case label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Badge::PendingReview => "PENDING REVIEW",
            Badge::Pending => "PENDING",
            Badge::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Main pane of the review view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPane {
    /// Document, data comparison and action buttons.
    Review,
    /// Correction sent, waiting for the employee.
    AwaitingResubmission,
    /// Override approved.
    Completed,
}

/// Top-level view the presentation layer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Pending task queue (home).
    Queue,
    /// Document review page.
    Review,
}

/// Category of an activity entry. Drives the icon only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Administrator requested a correction.
    CorrectionRequested,
    /// Verification flagged a name mismatch.
    NameMismatch,
    /// Automated extraction finished.
    AutomatedVerification,
    /// Employee uploaded the document.
    DocumentUploaded,
    /// Administrator approved via override.
    DocumentApprovedOverride,
}

/// Who produced an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntrySource {
    /// Automated verification pipeline.
    #[serde(rename = "Verification system")]
    VerificationSystem,
    /// Reviewing administrator.
    #[serde(rename = "Admin user")]
    Administrator,
}

impl EntrySource {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EntrySource::VerificationSystem => "Verification system",
            EntrySource::Administrator => "Admin user",
        }
    }

    /// True for entries generated without administrator input.
    #[must_use]
    pub fn is_system(self) -> bool {
        matches!(self, EntrySource::VerificationSystem)
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unique id of an activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Id made of a prefix and a sequence number, e.g. `correction-4`.
    #[must_use]
    pub fn sequenced(prefix: &str, seq: u64) -> Self {
        Self(format!("{prefix}-{seq}"))
    }

    /// Borrow as str.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
