//! Navigation seam. The kernel signals where to go; the host routes.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Pending task queue
    Queue,
    /// Document review page
    Review,
}

impl Destination {
    /// Fixed route identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::Queue => "queue",
            Destination::Review => "review",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host routing.
pub trait Navigator: Send + fmt::Debug {
    /// Switch the visible view.
    fn go_to(&mut self, destination: Destination);
}

/// Navigator that records every request. Clones share the history.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Destination>>>,
}

impl RecordingNavigator {
    /// Empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every destination requested so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Destination> {
        self.history.lock().clone()
    }

    /// Most recent destination.
    #[must_use]
    pub fn last(&self) -> Option<Destination> {
        self.history.lock().last().copied()
    }

    /// How many times `destination` was requested.
    #[must_use]
    pub fn count(&self, destination: Destination) -> usize {
        self.history.lock().iter().filter(|d| **d == destination).count()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&mut self, destination: Destination) {
        tracing::debug!(%destination, "navigate");
        self.history.lock().push(destination);
    }
}
