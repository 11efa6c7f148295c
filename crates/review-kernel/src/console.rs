//! Text front end used by the `review-kernel` binary.
//!
//! Parses one command per line, applies it to a [`ReviewSession`] and renders
//! snapshots as plain text or JSON.

use crate::activity::ActivityLog;
use crate::demo::{CaseFile, Verdict};
use crate::error::{Outcome, ReviewError};
use crate::notification::NotificationPhase;
use crate::session::{ReviewSession, SessionSnapshot};
use crate::types::{ReviewPane, View};
use std::fmt::Write as _;
use std::str::FromStr;

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Print the current snapshot
    Show,
    /// Print the document and data comparison
    Case,
    /// Enter the review view
    Open,
    /// Leave the review view
    Back,
    /// Request correction
    Correct,
    /// Open the override dialog
    Override,
    /// Replace the justification draft
    Justify(String),
    /// Cancel the override dialog
    Cancel,
    /// Confirm the override
    Confirm,
    /// Return to task queue
    Queue,
    /// Restore demo
    Restore,
    /// Dismiss the notification
    Dismiss,
    /// Print command list
    Help,
    /// Exit
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ReviewError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "show" | "" => Self::Show,
            "case" => Self::Case,
            "open" => Self::Open,
            "back" => Self::Back,
            "correct" => Self::Correct,
            "override" => Self::Override,
            "justify" => {
                if rest.is_empty() {
                    return Err(ReviewError::MissingArgument("justification text"));
                }
                Self::Justify(rest.to_string())
            }
            "cancel" => Self::Cancel,
            "confirm" => Self::Confirm,
            "queue" => Self::Queue,
            "restore" => Self::Restore,
            "dismiss" => Self::Dismiss,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ReviewError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  show              print the current state
  case              print the document and data comparison
  open              open the document review
  back              leave the review (keeps state)
  correct           request correction from the employee
  override          open the override dialog
  justify <text>    set the override justification
  cancel            close the override dialog and discard the draft
  confirm           confirm the override
  queue             return to task queue (archives the task)
  restore           restore the demo
  dismiss           dismiss the notification
  quit              exit";

/// Apply a state-changing command. `Show`, `Help` and `Quit` are no-ops here.
pub fn apply(session: &mut ReviewSession, command: &ConsoleCommand) -> Outcome {
    match command {
        ConsoleCommand::Open => session.open_review(),
        ConsoleCommand::Back => session.leave_review(),
        ConsoleCommand::Correct => session.request_correction(),
        ConsoleCommand::Override => session.open_override_modal(),
        ConsoleCommand::Justify(text) => {
            session.set_justification(text.clone());
            Outcome::Applied
        }
        ConsoleCommand::Cancel => session.cancel_override_modal(),
        ConsoleCommand::Confirm => session.confirm_override(),
        ConsoleCommand::Queue => session.return_to_queue(),
        ConsoleCommand::Restore => session.restore_demo(),
        ConsoleCommand::Dismiss => {
            session.dismiss_notification();
            Outcome::Applied
        }
        ConsoleCommand::Show
        | ConsoleCommand::Case
        | ConsoleCommand::Help
        | ConsoleCommand::Quit => Outcome::Applied,
    }
}

/// Plain-text rendering of a snapshot.
#[must_use]
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    match snapshot.view {
        View::Queue => {
            let _ = writeln!(out, "== Home: pending tasks ==");
            if snapshot.removed {
                let _ = writeln!(out, "  (no flagged documents)");
            } else {
                let _ = writeln!(
                    out,
                    "  [Mismatch] Passport verification required: Passport name does not match HR record"
                );
            }
        }
        View::Review => {
            let _ = writeln!(out, "== {} ==", snapshot.header);
            let _ = writeln!(out, "status: {}  [{}]", snapshot.status, snapshot.badge);
            let pane = match snapshot.pane {
                ReviewPane::Review if snapshot.status.is_transient() => "review (updating...)",
                ReviewPane::Review => "review",
                ReviewPane::AwaitingResubmission => "awaiting resubmission",
                ReviewPane::Completed => "completed",
            };
            let _ = writeln!(out, "pane: {pane}");
            if let Some(reference) = &snapshot.override_reference {
                let _ = writeln!(out, "Override reference ID: {reference}");
            }
            if snapshot.modal_open {
                let _ = writeln!(
                    out,
                    "override dialog open, justification: {:?} (confirm {})",
                    snapshot.justification_draft,
                    if snapshot.can_confirm_override { "enabled" } else { "disabled" }
                );
            }
        }
    }
    if let Some(toast) = &snapshot.notification {
        let phase = match toast.phase {
            NotificationPhase::Visible => "",
            NotificationPhase::Exiting => " (closing)",
        };
        let _ = writeln!(out, "toast: {} | {}{phase}", toast.message, toast.description);
    }
    let _ = writeln!(out, "activity:");
    for entry in &snapshot.activity_log {
        let _ = writeln!(
            out,
            "  {} [{}] {}: {} ({})",
            entry.timestamp, entry.id, entry.title, entry.description, entry.source
        );
    }
    out
}

/// Document details and the extracted-vs-HR comparison table.
#[must_use]
pub fn render_case(case: &CaseFile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({:?}, confidence {}%), employee {}",
        case.document.file_name, case.document.kind, case.document.confidence_pct, case.employee_name
    );
    let _ = writeln!(out, "reason for flag: {}", case.document.flag_reason);
    for row in case.compare() {
        let verdict = match row.verdict {
            Verdict::Match => "",
            Verdict::Mismatch => "  << mismatch",
            Verdict::Unverified => "  (unverified)",
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<18} {:<18}{verdict}",
            row.field.label(),
            row.extracted.as_deref().unwrap_or("-"),
            row.hr_record.as_deref().unwrap_or("-"),
        );
    }
    out
}

/// Plain-text rendering of an activity log. Administrator entries are
/// marked with `*`.
#[must_use]
pub fn render_log(log: &ActivityLog) -> String {
    let mut out = String::new();
    for entry in log {
        let marker = if entry.source.is_system() { ' ' } else { '*' };
        let _ = writeln!(
            out,
            "{marker} {} [{}] {}: {}",
            entry.timestamp, entry.id, entry.title, entry.description
        );
    }
    out
}

/// Pretty JSON rendering of a snapshot.
///
/// # Errors
/// [`ReviewError::Serialize`] if serialization fails.
pub fn render_json(snapshot: &SessionSnapshot) -> Result<String, ReviewError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
