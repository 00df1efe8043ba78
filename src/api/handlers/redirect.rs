//! Handler for documentation redirects.

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::domain::{RequestContext, Resolution};
use crate::error::AppError;
use crate::infrastructure::heartbeat::HeartbeatEvent;
use crate::state::AppState;
use crate::utils::client_ip::request_context;
use crate::web::HomePage;

/// Redirects `/<major>/<fragment>` to the Clang diagnostics reference.
///
/// # Endpoint
///
/// Router fallback: every path not claimed by another route.
///
/// # Request Flow
///
/// 1. Build a [`RequestContext`] from headers and the peer address
/// 2. Queue a heartbeat (fire-and-forget, only when enabled)
/// 3. Resolve the path through [`crate::domain::PathResolver`]
/// 4. Return 308 Permanent Redirect, the home page, or an error page
///
/// # Errors
///
/// Returns 400 Bad Request with an HTML explanation for a missing fragment
/// segment, a non-numeric version, or an invalid fragment.
/// Returns 500 Internal Server Error if the path cannot be decoded.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let ctx = request_context(&headers, Some(addr), state.behind_proxy);
    let path = uri.path();

    info!(
        ip = ctx.ip_or_empty(),
        user_agent = ctx.user_agent_or_empty(),
        referer = ctx.referer_or_empty(),
        request_id = ctx.request_id_or_empty(),
        "Received URL: >{}<",
        path
    );

    emit_heartbeat(&state, &ctx);

    let resolution = state.resolver.resolve(path).inspect_err(|e| {
        warn!(
            ip = ctx.ip_or_empty(),
            request_id = ctx.request_id_or_empty(),
            reason = e.kind().code(),
            version = e.version(),
            fragment = e.fragment(),
            "Rejected URL: >{}<",
            path
        );
    })?;

    match resolution {
        Resolution::Home => {
            info!("Non-redirectable URL >{}< served", path);
            Ok(HomePage::new(state.resolver.public_base()).into_response())
        }
        Resolution::Redirect(target) => {
            info!(
                ip = ctx.ip_or_empty(),
                user_agent = ctx.user_agent_or_empty(),
                referer = ctx.referer_or_empty(),
                request_id = ctx.request_id_or_empty(),
                "Redirecting to: >{}<",
                target
            );

            Ok((
                StatusCode::PERMANENT_REDIRECT,
                [(header::LOCATION, target.to_string())],
                "redirecting...",
            )
                .into_response())
        }
    }
}

/// Queues a heartbeat without waiting for it.
///
/// A full queue drops the beat: the monitor only needs to see one ping per
/// interval, not one per request.
fn emit_heartbeat(state: &AppState, ctx: &RequestContext) {
    if !state.heartbeat_enabled {
        return;
    }

    match state
        .heartbeat_sender
        .try_send(HeartbeatEvent::new(ctx.request_id.clone()))
    {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => debug!("Heartbeat queue full, dropping beat"),
        Err(TrySendError::Closed(_)) => warn!("Heartbeat queue closed"),
    }
}
