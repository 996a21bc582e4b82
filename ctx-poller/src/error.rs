//! Error types for the ctx-poller crate.

use std::time::Duration;

/// Errors returned when starting a poller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollerError {
    /// The poller already has a running background loop
    #[error("Poller already started")]
    AlreadyStarted,

    /// The configured interval is below the allowed minimum
    #[error("Invalid interval {interval:?}, should be greater or equal to {minimum:?}")]
    InvalidInterval {
        /// The configured interval
        interval: Duration,
        /// The smallest interval accepted by `start`
        minimum: Duration,
    },

    /// `start` was called outside of a Tokio runtime
    #[error("No Tokio runtime available to spawn the poll loop")]
    NoRuntime,
}

/// Convenience type alias for Results using PollerError.
pub type Result<T> = std::result::Result<T, PollerError>;
