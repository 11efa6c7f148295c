use super::ActivityEntry;
use crate::types::{EntryId, EntryKind, EntrySource};

/// Simulated clock value used by the seed and by the default timestamper.
pub const SEED_TIMESTAMP: &str = "23/02/2026, 13:15";

fn system_entry(id: &str, kind: EntryKind, title: &str, description: &str) -> ActivityEntry {
    ActivityEntry {
        id: EntryId(id.to_string()),
        timestamp: SEED_TIMESTAMP.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        source: EntrySource::VerificationSystem,
        justification: None,
    }
}

/// The three entries every session starts with, newest first.
#[must_use]
pub fn seed_entries() -> Vec<ActivityEntry> {
    vec![
        system_entry(
            "1",
            EntryKind::NameMismatch,
            "Name mismatch detected",
            "Flagged for manual review: Name on passport does not match HR record.",
        ),
        system_entry(
            "2",
            EntryKind::AutomatedVerification,
            "Automated verification completed",
            "Data extraction completed. Confidence score: 85%",
        ),
        system_entry(
            "3",
            EntryKind::DocumentUploaded,
            "Document uploaded",
            "Employee uploaded passport document (passport_scan.pdf)",
        ),
    ]
}
