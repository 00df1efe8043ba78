//! Background heartbeat processing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::service::LivenessReporter;

/// A request to emit one heartbeat.
///
/// Carries the originating request id so failures can be correlated with
/// the access log.
#[derive(Debug, Clone, Default)]
pub struct HeartbeatEvent {
    pub request_id: Option<String>,
}

impl HeartbeatEvent {
    pub fn new(request_id: Option<String>) -> Self {
        Self { request_id }
    }
}

/// Drains the heartbeat channel until every sender is dropped.
///
/// Each event triggers one [`LivenessReporter::beat`]. Errors are logged and
/// never stop the worker.
pub async fn run_heartbeat_worker(
    mut rx: mpsc::Receiver<HeartbeatEvent>,
    reporter: Arc<dyn LivenessReporter>,
) {
    info!(enabled = reporter.is_enabled(), "Heartbeat worker started");

    while let Some(event) = rx.recv().await {
        let request_id = event.request_id.as_deref().unwrap_or_default();

        match reporter.beat().await {
            Ok(()) => debug!(request_id, "Heartbeat emitted"),
            Err(e) => error!(request_id, error = %e, "Heartbeat failed"),
        }
    }

    info!("Heartbeat channel closed, worker stopping");
}
