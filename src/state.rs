//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::PathResolver;
use crate::infrastructure::heartbeat::HeartbeatEvent;

/// State shared by every request handler.
///
/// Cheap to clone: the resolver is immutable and shared behind an [`Arc`],
/// the heartbeat sender is a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PathResolver>,
    pub heartbeat_sender: mpsc::Sender<HeartbeatEvent>,
    pub heartbeat_enabled: bool,
    /// Trust forwarding headers when determining the client IP.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        resolver: Arc<PathResolver>,
        heartbeat_sender: mpsc::Sender<HeartbeatEvent>,
        heartbeat_enabled: bool,
        behind_proxy: bool,
    ) -> Self {
        Self {
            resolver,
            heartbeat_sender,
            heartbeat_enabled,
            behind_proxy,
        }
    }
}
