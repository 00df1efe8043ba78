//! No-op heartbeat implementation for testing or disabled heartbeats.

use super::service::{HeartbeatResult, LivenessReporter};
use async_trait::async_trait;
use tracing::debug;

/// A reporter that does nothing.
///
/// Used when `HEARTBEAT_TOKEN` is not configured.
pub struct NullHeartbeat;

impl NullHeartbeat {
    /// Creates a new NullHeartbeat instance.
    pub fn new() -> Self {
        debug!("No heartbeat token configured");
        Self
    }
}

impl Default for NullHeartbeat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivenessReporter for NullHeartbeat {
    async fn beat(&self) -> HeartbeatResult<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
