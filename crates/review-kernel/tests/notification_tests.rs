use review_kernel::notification::{Notification, NotificationCoordinator, NotificationPhase};
use review_kernel::scheduler::{ManualScheduler, TimerKind};
use review_test_utils::{harness, JUSTIFICATION, NOTIFICATION_EXIT, NOTIFICATION_VISIBLE};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_auto_dismiss_is_two_phase() {
    let mut h = harness();
    h.session.request_correction();

    h.advance(NOTIFICATION_VISIBLE);
    let toast = h.session.notification().unwrap();
    assert_eq!(toast.phase, NotificationPhase::Exiting);

    h.advance(NOTIFICATION_EXIT);
    assert!(h.session.notification().is_none());
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn test_manual_dismiss_starts_exit_immediately() {
    let mut h = harness();
    h.session.request_correction();
    h.settle_transition();

    h.session.dismiss_notification();

    assert_eq!(
        h.session.notification().unwrap().phase,
        NotificationPhase::Exiting
    );
    assert_eq!(h.clock.pending_kinds(), vec![TimerKind::NotificationRemove]);

    h.advance(NOTIFICATION_EXIT);
    assert!(h.session.notification().is_none());
}

#[test]
fn test_dismiss_twice_equals_dismiss_once() {
    let mut once = harness();
    once.session.request_correction();
    once.session.dismiss_notification();

    let mut twice = harness();
    twice.session.request_correction();
    twice.session.dismiss_notification();
    twice.session.dismiss_notification();

    assert_eq!(once.session.notification(), twice.session.notification());
    assert_eq!(once.clock.pending_kinds(), twice.clock.pending_kinds());

    once.advance(NOTIFICATION_EXIT);
    twice.advance(NOTIFICATION_EXIT);
    assert!(once.session.notification().is_none());
    assert!(twice.session.notification().is_none());
}

#[test]
fn test_dismiss_with_nothing_shown_is_noop() {
    let mut h = harness();
    h.session.dismiss_notification();
    h.session.dismiss_notification();
    assert!(h.session.notification().is_none());
    assert_eq!(h.clock.pending(), 0);
}

#[test]
fn test_new_notification_replaces_exiting_one() {
    let clock = Arc::new(ManualScheduler::new());
    let mut toasts =
        NotificationCoordinator::new(clock.clone(), NOTIFICATION_VISIBLE, NOTIFICATION_EXIT);
    toasts.show(Notification::correction_sent());
    toasts.dismiss();
    assert_eq!(toasts.current().unwrap().phase, NotificationPhase::Exiting);

    toasts.show(Notification::document_approved());

    let toast = toasts.current().unwrap();
    assert_eq!(toast.message, "Document approved");
    assert_eq!(toast.phase, NotificationPhase::Visible);
    assert_eq!(clock.pending_kinds(), vec![TimerKind::NotificationExit]);

    // the superseded removal timer is gone and cannot clear the new toast
    clock.advance(NOTIFICATION_EXIT + Duration::from_millis(1), |timer| {
        toasts.on_timer(&timer);
    });
    assert!(toasts.is_visible());
}

#[test]
fn test_override_after_restore_shows_fresh_toast() {
    let mut h = harness();
    h.session.request_correction();
    h.session.dismiss_notification();
    h.session.restore_demo();
    assert!(h.session.notification().is_none());

    h.override_with(JUSTIFICATION);

    let toast = h.session.notification().unwrap();
    assert_eq!(toast.message, "Document approved");
    assert_eq!(toast.phase, NotificationPhase::Visible);

    h.advance(NOTIFICATION_EXIT + Duration::from_millis(1));
    assert!(h.session.notification().is_some());
}
