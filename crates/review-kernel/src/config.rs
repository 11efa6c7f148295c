//! Session configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::activity::Timestamper;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pacing delays and timestamp source for a review session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Delay before a transient status auto-advances
    pub transition_delay_ms: u64,
    /// How long a notification stays fully visible
    pub notification_visible_ms: u64,
    /// Exit grace period before a notification is removed
    pub notification_exit_ms: u64,
    /// Timestamp source for new activity entries
    pub timestamp: Timestamper,
}

impl ReviewConfig {
    /// With transition delay
    #[inline]
    #[must_use]
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay_ms = duration_ms(delay);
        self
    }

    /// With notification durations
    #[inline]
    #[must_use]
    pub fn with_notification_timing(mut self, visible: Duration, exit: Duration) -> Self {
        self.notification_visible_ms = duration_ms(visible);
        self.notification_exit_ms = duration_ms(exit);
        self
    }

    /// With timestamp source
    #[inline]
    #[must_use]
    pub fn with_timestamper(mut self, timestamp: Timestamper) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Transition delay as a `Duration`.
    #[must_use]
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Visible duration as a `Duration`.
    #[must_use]
    pub fn notification_visible(&self) -> Duration {
        Duration::from_millis(self.notification_visible_ms)
    }

    /// Exit grace period as a `Duration`.
    #[must_use]
    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    /// Reject values the session cannot work with.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] for a zero transition delay or a zero visible duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "transition_delay_ms must be greater than zero".to_string(),
            ));
        }
        if self.notification_visible_ms == 0 {
            return Err(ConfigError::Invalid(
                "notification_visible_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    /// [`ConfigError::Read`] when the file cannot be read, otherwise as
    /// [`ReviewConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&source)
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: 800,
            notification_visible_ms: 5000,
            notification_exit_ms: 200,
            timestamp: Timestamper::default(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
