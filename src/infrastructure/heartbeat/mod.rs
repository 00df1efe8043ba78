//! Liveness reporting to an external uptime monitor.
//!
//! Provides a [`LivenessReporter`] trait with two implementations:
//! - [`HttpHeartbeat`] - GET request to the configured monitor URL
//! - [`NullHeartbeat`] - No-op implementation when no token is configured
//!
//! Request handlers never call a reporter directly. They push a
//! [`HeartbeatEvent`] into a bounded channel drained by [`run_heartbeat_worker`].

mod http_heartbeat;
mod null_heartbeat;
mod service;
mod worker;

pub use http_heartbeat::HttpHeartbeat;
pub use null_heartbeat::NullHeartbeat;
pub use service::{HeartbeatError, HeartbeatResult, LivenessReporter};
pub use worker::{HeartbeatEvent, run_heartbeat_worker};

#[cfg(test)]
pub use service::MockLivenessReporter;
