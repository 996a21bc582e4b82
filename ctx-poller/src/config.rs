//! Configuration for [`CtxPoller`](crate::CtxPoller)
//!
//! The interval and label of a poller are fixed once it is constructed. The
//! interval floor is enforced when the poller starts, not here, so an invalid
//! config can still be built and inspected.

use std::time::Duration;

use crate::error::{PollerError, Result};

/// Smallest interval accepted by `start`.
pub const MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Interval used by [`default_poller`](crate::default_poller).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for a single poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Time between the end of one wait and the start of the next invocation
    /// Default: 5 seconds
    pub interval: Duration,

    /// Label attached to log records emitted by the poll loop
    /// Default: "poller"
    pub name: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            name: "poller".to_string(),
        }
    }
}

impl PollerConfig {
    /// Create a new PollerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the interval against [`MIN_INTERVAL`]
    pub fn validate(&self) -> Result<()> {
        if self.interval < MIN_INTERVAL {
            return Err(PollerError::InvalidInterval {
                interval: self.interval,
                minimum: MIN_INTERVAL,
            });
        }

        Ok(())
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.name, "poller");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let too_fast = PollerConfig::new().with_interval(Duration::from_millis(4999));
        assert_eq!(
            too_fast.validate(),
            Err(PollerError::InvalidInterval {
                interval: Duration::from_millis(4999),
                minimum: MIN_INTERVAL,
            })
        );

        let at_floor = PollerConfig::new().with_interval(MIN_INTERVAL);
        assert!(at_floor.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = PollerConfig::new()
            .with_interval(Duration::from_secs(30))
            .with_name("inventory-sync");

        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.name, "inventory-sync");
        assert!(config.validate().is_ok());
    }
}
