//! Liveness reporter trait and error types.

use async_trait::async_trait;

/// Errors that can occur while emitting a heartbeat.
#[derive(Debug, thiserror::Error)]
pub enum HeartbeatError {
    #[error("Unable to emit heartbeat to {url}: {message}")]
    Request { url: String, message: String },

    #[error("Emitting heartbeat failed with status {0}")]
    UnexpectedStatus(u16),
}

/// Result type for heartbeat operations.
pub type HeartbeatResult<T> = Result<T, HeartbeatError>;

/// Capability for signalling liveness to an uptime monitor.
///
/// Failures are reported to the caller, which is expected to log them and
/// carry on; a missed heartbeat must never affect request handling.
///
/// # Implementations
///
/// - [`crate::infrastructure::heartbeat::HttpHeartbeat`] - HTTP GET to a monitor endpoint
/// - [`crate::infrastructure::heartbeat::NullHeartbeat`] - No-op when heartbeats are disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LivenessReporter: Send + Sync {
    /// Emits a single heartbeat.
    ///
    /// # Errors
    ///
    /// Returns [`HeartbeatError::Request`] if the monitor cannot be reached
    /// within the configured timeout and [`HeartbeatError::UnexpectedStatus`]
    /// for any non-200 response.
    async fn beat(&self) -> HeartbeatResult<()>;

    /// Whether heartbeats are actually sent.
    ///
    /// Used by the health endpoint to report heartbeat status.
    fn is_enabled(&self) -> bool;
}
