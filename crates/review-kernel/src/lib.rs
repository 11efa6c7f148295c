//! Review Kernel (review-kernel)
//!
//! State holder for the flagged-passport review flow:
//! 1. **Task state machine**: status transitions, timed auto-advance, guards
//! 2. **Activity log**: append-only audit trail, newest first
//! 3. **Notifications**: single toast slot with two-phase dismissal
//!
//! # Quick Start
//!
//! ```rust
//! use review_kernel::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualScheduler::new());
//! let mut session = ReviewSession::new(
//!     &ReviewConfig::default(),
//!     clock.clone(),
//!     Box::new(RecordingNavigator::new()),
//! );
//!
//! session.request_correction();
//! assert_eq!(session.status(), TaskStatus::PendingTransitionCorrection);
//!
//! clock.advance(Duration::from_millis(800), |fired| session.on_timer(fired));
//! assert_eq!(session.status(), TaskStatus::Pending);
//! ```

// Core modules
pub mod activity;
pub mod config;
pub mod demo;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod scheduler;
pub mod session;
pub mod state_machine;
pub mod types;

// Front end
pub mod console;

// Re-exports
pub use error::*;
pub use types::*;

/// Common imports for driving a session
pub mod prelude {
    pub use crate::activity::{ActivityEntry, ActivityLog, Timestamper};
    pub use crate::config::ReviewConfig;
    pub use crate::error::{Outcome, TransitionError};
    pub use crate::navigation::{Destination, Navigator, RecordingNavigator};
    pub use crate::notification::{Notification, NotificationPhase, NotificationTone};
    pub use crate::scheduler::{FiredTimer, ManualScheduler, Scheduler, TimerKind, TokioScheduler};
    pub use crate::session::{ReviewSession, SessionSnapshot};
    pub use crate::types::{Badge, EntryKind, EntrySource, ReviewPane, TaskEvent, TaskStatus, View};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
