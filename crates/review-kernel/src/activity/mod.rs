//! Activity log
//!
//! Reverse-chronological audit trail of everything that happened to the
//! task. Entries are immutable once created; the log only grows by
//! [`ActivityLog::prepend`] and only shrinks by [`ActivityLog::reset`],
//! which restores the fixed three-entry seed.

mod seed;

pub use seed::{seed_entries, SEED_TIMESTAMP};

use crate::types::{EntryId, EntryKind, EntrySource};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Unique within a session
    pub id: EntryId,
    /// Display timestamp
    pub timestamp: String,
    /// Category, drives the icon
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// System or administrator
    pub source: EntrySource,
    /// Override reason, only on override entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl ActivityEntry {
    /// Entry recorded when the administrator requests a correction.
    #[must_use]
    pub fn correction_requested(id: EntryId, timestamp: String) -> Self {
        Self {
            id,
            timestamp,
            kind: EntryKind::CorrectionRequested,
            title: "Correction requested".to_string(),
            description: "Administrator requested employee to resubmit documentation with correct information."
                .to_string(),
            source: EntrySource::Administrator,
            justification: None,
        }
    }

    /// Entry recorded when the administrator approves via override.
    ///
    /// `justification` must already be trimmed.
    #[must_use]
    pub fn override_approved(id: EntryId, timestamp: String, justification: &str) -> Self {
        Self {
            id,
            timestamp,
            kind: EntryKind::DocumentApprovedOverride,
            title: "Document approved (override)".to_string(),
            description: format!(
                "Administrator approved document despite mismatch. Justification: \"{justification}\""
            ),
            source: EntrySource::Administrator,
            justification: Some(justification.to_string()),
        }
    }
}

/// Append-only log, newest entry first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Log holding the fixed seed.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            entries: seed_entries(),
        }
    }

    /// Insert at the front. No deduplication, no cap.
    pub fn prepend(&mut self, entry: ActivityEntry) {
        self.entries.insert(0, entry);
    }

    /// Replace the contents with the seed.
    pub fn reset(&mut self) {
        self.entries = seed_entries();
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Most recent entry.
    #[must_use]
    pub fn newest(&self) -> Option<&ActivityEntry> {
        self.entries.first()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a log built through this API, kept for clippy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> std::slice::Iter<'_, ActivityEntry> {
        self.entries.iter()
    }

    /// True when the log is exactly the seed.
    #[must_use]
    pub fn is_seed(&self) -> bool {
        self.entries == seed_entries()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Index<usize> for ActivityLog {
    type Output = ActivityEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a ActivityEntry;
    type IntoIter = std::slice::Iter<'a, ActivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// How new entries get their display timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestamper {
    /// Always the same string (simulated clock).
    Fixed {
        /// Display value
        value: String,
    },
    /// Local wall clock, `dd/mm/yyyy, hh:mm`.
    Wall,
}

impl Timestamper {
    /// Timestamp for an entry created now.
    #[must_use]
    pub fn stamp(&self) -> String {
        match self {
            Timestamper::Fixed { value } => value.clone(),
            Timestamper::Wall => Local::now().format("%d/%m/%Y, %H:%M").to_string(),
        }
    }
}

impl Default for Timestamper {
    fn default() -> Self {
        Timestamper::Fixed {
            value: SEED_TIMESTAMP.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_puts_newest_first() {
        let mut log = ActivityLog::seeded();
        log.prepend(ActivityEntry::correction_requested(
            EntryId::sequenced("correction", 4),
            SEED_TIMESTAMP.to_string(),
        ));
        assert_eq!(log.len(), 4);
        assert_eq!(log[0].kind, EntryKind::CorrectionRequested);
        assert_eq!(log[1].kind, EntryKind::NameMismatch);
    }

    #[test]
    fn prepend_does_not_deduplicate() {
        let mut log = ActivityLog::seeded();
        let entry = ActivityEntry::correction_requested(EntryId("dup".into()), "t".into());
        log.prepend(entry.clone());
        log.prepend(entry);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn reset_restores_seed() {
        let mut log = ActivityLog::seeded();
        log.prepend(ActivityEntry::override_approved(
            EntryId::sequenced("override", 9),
            "t".into(),
            "ok",
        ));
        assert!(!log.is_seed());
        log.reset();
        assert!(log.is_seed());
    }

    #[test]
    fn override_entry_embeds_justification() {
        let entry = ActivityEntry::override_approved(EntryId("x".into()), "t".into(), "Legal name change");
        assert_eq!(entry.justification.as_deref(), Some("Legal name change"));
        assert!(entry.description.ends_with("Justification: \"Legal name change\""));
    }

    #[test]
    fn entry_serializes_type_field() {
        let json = serde_json::to_value(&seed_entries()[0]).unwrap();
        assert_eq!(json["type"], "name_mismatch");
        assert_eq!(json["source"], "Verification system");
        assert!(json.get("justification").is_none());
    }

    #[test]
    fn wall_timestamper_uses_display_format() {
        let stamp = Timestamper::Wall.stamp();
        assert_eq!(stamp.len(), 17, "{stamp}");
        assert_eq!(&stamp[2..3], "/");
        assert_eq!(&stamp[5..6], "/");
        assert_eq!(&stamp[10..12], ", ");
        assert_eq!(&stamp[14..15], ":");
        assert!(stamp
            .chars()
            .enumerate()
            .filter(|(i, _)| ![2, 5, 10, 11, 14].contains(i))
            .all(|(_, c)| c.is_ascii_digit()));
    }

    #[test]
    fn fixed_timestamper_is_stable() {
        let stamper = Timestamper::default();
        assert_eq!(stamper.stamp(), SEED_TIMESTAMP);
        assert_eq!(stamper.stamp(), stamper.stamp());
    }
}
