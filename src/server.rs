//! HTTP server initialization and runtime setup.
//!
//! Handles resolver construction, heartbeat wiring, worker spawning, and Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::PathResolver;
use crate::infrastructure::heartbeat::{
    HttpHeartbeat, LivenessReporter, NullHeartbeat, run_heartbeat_worker,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Version rule table (built-in or from `VERSION_RULES_FILE`)
/// - Path resolver
/// - Liveness reporter (HTTP or NullHeartbeat fallback)
/// - Background heartbeat worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The rule file cannot be loaded
/// - The public address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let rules = config.version_rules()?;
    tracing::info!("Loaded {} version rules", rules.len());

    let resolver = Arc::new(PathResolver::new(rules, config.public_base()?));

    let reporter = build_reporter(&config);
    let heartbeat_enabled = reporter.is_enabled();

    let (heartbeat_tx, heartbeat_rx) = mpsc::channel(config.heartbeat_queue_capacity);
    tokio::spawn(run_heartbeat_worker(heartbeat_rx, reporter));

    let state = AppState::new(
        resolver,
        heartbeat_tx,
        heartbeat_enabled,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Picks the liveness reporter for the configuration.
///
/// Falls back to [`NullHeartbeat`] when no token is configured or the HTTP
/// client cannot be built; heartbeats never prevent startup.
fn build_reporter(config: &Config) -> Arc<dyn LivenessReporter> {
    let (Some(target), Some(token)) = (&config.heartbeat_target, &config.heartbeat_token) else {
        tracing::info!("Heartbeat disabled (NullHeartbeat)");
        return Arc::new(NullHeartbeat::new());
    };

    match HttpHeartbeat::new(target, token, config.heartbeat_timeout()) {
        Ok(heartbeat) => {
            tracing::info!("Heartbeat enabled");
            Arc::new(heartbeat)
        }
        Err(e) => {
            tracing::warn!("Failed to set up heartbeat: {}. Using NullHeartbeat.", e);
            Arc::new(NullHeartbeat::new())
        }
    }
}

/// Resolves when Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
