//! Session behaviour tests
//!
//! Drive a full session on a manual clock and check ordering, timed
//! transitions, guards, cancellation and reset.

use pretty_assertions::assert_eq;
use review_kernel::activity::seed_entries;
use review_kernel::navigation::Destination;
use review_kernel::notification::NotificationTone;
use review_kernel::scheduler::TimerKind;
use review_kernel::{EntryKind, EntrySource, TaskStatus, TransitionError, View};
use review_test_utils::{harness, JUSTIFICATION, TRANSITION_DELAY};
use std::time::Duration;

#[test]
fn test_correction_logs_before_status_is_visible() {
    let mut h = harness();

    assert!(h.session.request_correction().is_applied());

    // synchronous: no timer has fired yet
    let log = h.session.activity_log();
    assert_eq!(log[0].kind, EntryKind::CorrectionRequested);
    assert_eq!(log[0].source, EntrySource::Administrator);
    assert_eq!(log.len(), 4);
    assert_eq!(h.session.status(), TaskStatus::PendingTransitionCorrection);

    let toast = h.session.notification().unwrap();
    assert_eq!(toast.message, "Correction request sent to employee");
    assert_eq!(toast.tone, NotificationTone::Success);
}

#[test]
fn test_correction_auto_advances_once() {
    let mut h = harness();
    h.session.request_correction();

    h.advance(TRANSITION_DELAY - Duration::from_millis(1));
    assert_eq!(h.session.status(), TaskStatus::PendingTransitionCorrection);

    h.advance(Duration::from_millis(1));
    assert_eq!(h.session.status(), TaskStatus::Pending);
    assert!(!h.session.transition_pending());

    // waiting out the delay again changes nothing
    h.advance(TRANSITION_DELAY);
    assert_eq!(h.session.status(), TaskStatus::Pending);
    assert_eq!(h.session.activity_log().len(), 4);
}

#[test]
fn test_correction_ignored_while_transient() {
    let mut h = harness();
    h.session.request_correction();

    let second = h.session.request_correction();
    assert!(matches!(
        second.rejection(),
        Some(TransitionError::IllegalTransition { .. })
    ));
    assert_eq!(h.session.activity_log().len(), 4);
    assert_eq!(
        h.clock.pending_kinds().iter().filter(|k| **k == TimerKind::AutoAdvance).count(),
        1
    );
}

#[test]
fn test_whitespace_justification_is_rejected() {
    let mut h = harness();

    let outcome = h.override_with("   ");

    assert_eq!(outcome.rejection(), Some(&TransitionError::EmptyJustification));
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
    assert_eq!(h.session.activity_log().entries(), seed_entries().as_slice());
    assert!(h.session.modal_open());
    assert!(h.session.notification().is_none());
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn test_override_appends_then_transitions_then_completes() {
    let mut h = harness();

    let outcome = h.override_with(&format!("  {JUSTIFICATION}\n"));
    assert!(outcome.is_applied());

    let entry = &h.session.activity_log()[0];
    assert_eq!(entry.kind, EntryKind::DocumentApprovedOverride);
    assert_eq!(entry.justification.as_deref(), Some(JUSTIFICATION));
    assert_eq!(
        entry.description,
        format!("Administrator approved document despite mismatch. Justification: \"{JUSTIFICATION}\"")
    );
    assert_eq!(h.session.status(), TaskStatus::ApprovedTransition);
    assert!(!h.session.modal_open());
    assert_eq!(h.session.justification_draft().text(), "");
    assert_eq!(h.session.notification().unwrap().message, "Document approved");

    h.settle_transition();
    assert_eq!(h.session.status(), TaskStatus::Completed);
}

#[test]
fn test_return_to_queue_cancels_outstanding_timer() {
    let mut h = harness();
    h.session.request_correction();

    assert!(h.session.return_to_queue().is_applied());
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
    assert!(h.session.removed());

    h.advance(TRANSITION_DELAY * 2);
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
    assert!(!h.clock.pending_kinds().contains(&TimerKind::AutoAdvance));
}

#[test]
fn test_return_to_queue_resets_everything() {
    let mut h = harness();
    h.override_with(JUSTIFICATION);
    h.settle_transition();
    h.session.open_override_modal();
    h.session.set_justification("draft");

    h.session.return_to_queue();

    assert!(h.session.removed());
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
    assert!(h.session.activity_log().is_seed());
    assert_eq!(h.session.justification_draft().text(), "");
    assert!(h.session.queue().is_empty());
    assert_eq!(h.session.view(), View::Queue);
    assert_eq!(h.navigator.count(Destination::Queue), 1);
    assert_eq!(h.navigator.last(), Some(Destination::Queue));
}

#[test]
fn test_removed_only_after_return_to_queue() {
    let mut h = harness();
    assert!(!h.session.removed());
    h.session.request_correction();
    assert!(!h.session.removed());
    h.settle_transition();
    assert!(!h.session.removed());
    h.session.return_to_queue();
    assert!(h.session.removed());
}

#[test]
fn test_restore_demo_brings_task_back() {
    let mut h = harness();
    h.session.request_correction();
    h.session.return_to_queue();

    assert!(h.session.restore_demo().is_applied());
    assert!(!h.session.removed());
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
    assert_eq!(h.session.queue().len(), 1);
    assert!(h.session.notification().is_none());
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn test_cancel_override_discards_draft() {
    let mut h = harness();
    h.session.open_override_modal();
    h.session.set_justification(JUSTIFICATION);

    h.session.cancel_override_modal();

    assert!(!h.session.modal_open());
    assert_eq!(h.session.justification_draft().text(), "");
    assert_eq!(h.session.status(), TaskStatus::PendingReview);
}

#[test]
fn test_modal_toggles_in_any_status() {
    let mut h = harness();
    h.session.request_correction();
    h.settle_transition();

    assert!(h.session.open_override_modal().is_applied());
    assert_eq!(h.session.status(), TaskStatus::Pending);
    // confirming is still impossible from pending
    h.session.set_justification(JUSTIFICATION);
    assert!(!h.session.confirm_override().is_applied());
    assert_eq!(h.session.status(), TaskStatus::Pending);
}

#[test]
fn test_leave_review_pauses_transition_until_reopened() {
    let mut h = harness();
    h.session.open_review();
    h.session.request_correction();

    h.session.leave_review();
    h.advance(TRANSITION_DELAY * 2);
    assert_eq!(h.session.status(), TaskStatus::PendingTransitionCorrection);
    assert!(!h.session.removed());

    h.session.open_review();
    h.settle_transition();
    assert_eq!(h.session.status(), TaskStatus::Pending);
    assert_eq!(
        h.navigator.history(),
        vec![Destination::Review, Destination::Queue, Destination::Review]
    );
}

#[test]
fn test_removed_task_cannot_be_reviewed() {
    let mut h = harness();
    h.session.return_to_queue();
    assert_eq!(
        h.session.open_review().rejection(),
        Some(&TransitionError::TaskRemoved)
    );
    assert_eq!(h.session.view(), View::Queue);
}

#[test]
fn test_entry_ids_stay_unique_across_resets() {
    let mut h = harness();
    h.session.request_correction();
    let first = h.session.activity_log()[0].id.clone();
    h.session.restore_demo();
    h.session.request_correction();
    let second = h.session.activity_log()[0].id.clone();
    assert_ne!(first, second);
}

#[test]
fn test_snapshot_reflects_session() {
    let mut h = harness();
    h.session.open_review();
    h.override_with(JUSTIFICATION);

    let snapshot = h.session.snapshot();
    assert_eq!(snapshot.status, TaskStatus::ApprovedTransition);
    assert_eq!(snapshot.badge.label(), "APPROVED");
    assert_eq!(snapshot.header, "Task review");
    assert_eq!(snapshot.activity_log.len(), 4);
    assert!(!snapshot.can_confirm_override);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["status"], "approved_transition");
    assert_eq!(json["badge"], "APPROVED");
    assert_eq!(json["activity_log"][0]["type"], "document_approved_override");
    assert_eq!(json["activity_log"][0]["justification"], JUSTIFICATION);
}

fn seed_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1",
            "timestamp": "23/02/2026, 13:15",
            "type": "name_mismatch",
            "title": "Name mismatch detected",
            "description": "Flagged for manual review: Name on passport does not match HR record.",
            "source": "Verification system"
        },
        {
            "id": "2",
            "timestamp": "23/02/2026, 13:15",
            "type": "automated_verification",
            "title": "Automated verification completed",
            "description": "Data extraction completed. Confidence score: 85%",
            "source": "Verification system"
        },
        {
            "id": "3",
            "timestamp": "23/02/2026, 13:15",
            "type": "document_uploaded",
            "title": "Document uploaded",
            "description": "Employee uploaded passport document (passport_scan.pdf)",
            "source": "Verification system"
        }
    ])
}

fn log_json(h: &review_test_utils::Harness) -> serde_json::Value {
    serde_json::to_value(h.session.activity_log().entries()).unwrap()
}

#[test]
fn test_seed_log_matches_fixed_text() {
    let mut h = harness();
    assert_eq!(log_json(&h), seed_json());

    h.session.request_correction();
    h.session.return_to_queue();
    assert_eq!(log_json(&h), seed_json());

    h.session.restore_demo();
    h.override_with(JUSTIFICATION);
    h.session.restore_demo();
    assert_eq!(log_json(&h), seed_json());
}

#[test]
fn test_correction_entry_text() {
    let mut h = harness();
    h.session.request_correction();

    let newest = serde_json::to_value(h.session.activity_log().newest().unwrap()).unwrap();
    assert_eq!(
        newest,
        serde_json::json!({
            "id": "correction-4",
            "timestamp": "23/02/2026, 13:15",
            "type": "correction_requested",
            "title": "Correction requested",
            "description": "Administrator requested employee to resubmit documentation with correct information.",
            "source": "Admin user"
        })
    );
}

#[test]
fn test_override_entry_text() {
    let mut h = harness();
    h.override_with(JUSTIFICATION);

    let newest = serde_json::to_value(h.session.activity_log().newest().unwrap()).unwrap();
    assert_eq!(
        newest,
        serde_json::json!({
            "id": "override-4",
            "timestamp": "23/02/2026, 13:15",
            "type": "document_approved_override",
            "title": "Document approved (override)",
            "description": format!(
                "Administrator approved document despite mismatch. Justification: \"{JUSTIFICATION}\""
            ),
            "source": "Admin user",
            "justification": JUSTIFICATION
        })
    );
}

#[test]
fn test_completed_snapshot_carries_override_reference() {
    let mut h = harness();
    h.override_with(JUSTIFICATION);
    assert_eq!(h.session.snapshot().override_reference, None);

    h.settle_transition();
    let snapshot = h.session.snapshot();
    assert_eq!(snapshot.status, TaskStatus::Completed);
    assert_eq!(snapshot.override_reference.as_deref(), Some("VER-2026-1847"));
}
