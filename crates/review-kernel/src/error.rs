//! Error types for the review kernel
//!
//! Rejected administrator actions are not faults: session operations report
//! them through [`Outcome::Ignored`] and leave all state untouched. Only
//! configuration loading and console parsing surface real errors.

use crate::types::{TaskEvent, TaskStatus};
use std::path::PathBuf;

/// Why a status-changing event was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// No row of the transition table matches.
    #[error("illegal transition: {event:?} from {from}")]
    IllegalTransition {
        /// Status at the time of the event
        from: TaskStatus,
        /// Rejected event
        event: TaskEvent,
    },

    /// Override confirmed with an empty or whitespace-only justification.
    #[error("justification is empty")]
    EmptyJustification,

    /// The task has been archived out of the queue.
    #[error("task has been removed from the queue")]
    TaskRemoved,
}

/// Result of a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested.
    Applied,
    /// Nothing changed.
    Ignored(TransitionError),
}

impl Outcome {
    /// True when the operation took effect.
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Rejection reason, if any.
    #[inline]
    #[must_use]
    pub fn rejection(&self) -> Option<&TransitionError> {
        match self {
            Self::Applied => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

impl From<Result<(), TransitionError>> for Outcome {
    fn from(value: Result<(), TransitionError>) -> Self {
        match value {
            Ok(()) => Self::Applied,
            Err(reason) => Self::Ignored(reason),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`crate::config::ReviewConfig`]
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but are unusable
    #[error("invalid configuration value: {0}")]
    Invalid(String),
}

/// Top-level library error
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Configuration failed to load
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Console input not recognised
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Console command needs an argument
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Snapshot serialization failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O failure on the console streams
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
