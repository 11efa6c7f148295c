//! Task status transition table.
//!
//! Pure functions only: guards that need session data (the justification
//! draft, the removed flag) live in [`crate::session`].

use crate::error::TransitionError;
use crate::types::{TaskEvent, TaskStatus};

/// Status reached by applying `event` in `from`.
///
/// # Errors
/// [`TransitionError::IllegalTransition`] when the table has no such row.
pub fn next_status(from: TaskStatus, event: TaskEvent) -> Result<TaskStatus, TransitionError> {
    use TaskEvent::*;
    use TaskStatus::*;

    let to = match (from, event) {
        (PendingReview, RequestCorrection) => PendingTransitionCorrection,
        (PendingReview, ConfirmOverride) => ApprovedTransition,
        (PendingTransitionCorrection, TimerElapsed) => Pending,
        (ApprovedTransition, TimerElapsed) => Completed,
        (_, ReturnToQueue | RestoreDemo) => PendingReview,
        _ => return Err(TransitionError::IllegalTransition { from, event }),
    };
    Ok(to)
}

/// Checks that `event` is accepted in `from`.
///
/// # Errors
/// [`TransitionError::IllegalTransition`] when it is not.
pub fn validate_transition(from: TaskStatus, event: TaskEvent) -> Result<(), TransitionError> {
    next_status(from, event).map(|_| ())
}

/// Events the table accepts in `from`.
pub fn allowed_events(from: TaskStatus) -> Vec<TaskEvent> {
    use TaskEvent::*;
    use TaskStatus::*;

    match from {
        PendingReview => vec![RequestCorrection, ConfirmOverride, ReturnToQueue, RestoreDemo],
        PendingTransitionCorrection | ApprovedTransition => {
            vec![TimerElapsed, ReturnToQueue, RestoreDemo]
        }
        Pending | Completed => vec![ReturnToQueue, RestoreDemo],
    }
}
